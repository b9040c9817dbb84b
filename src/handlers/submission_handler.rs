use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::SubmitQuizRequest,
};

#[post("/quizzes/{quiz_id}/submissions")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let submission = state
        .submission_service
        .submit_quiz(auth.user_id(), &quiz_id, &request.answers)
        .await?;
    Ok(HttpResponse::Created().json(submission))
}

#[get("/quizzes/{quiz_id}/submissions")]
pub async fn get_quiz_submissions(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let submissions = state
        .submission_service
        .get_quiz_submissions(auth.user_id(), &quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[get("/quizzes/{quiz_id}/submissions/me")]
pub async fn get_my_quiz_submissions(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let submissions = state
        .submission_service
        .get_my_quiz_submissions(auth.user_id(), &quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[get("/submissions/{id}")]
pub async fn get_submission(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let details = state
        .submission_service
        .get_submission(auth.user_id(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(details))
}
