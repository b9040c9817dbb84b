use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/courses/{course_id}/progression/me")]
pub async fn get_my_progression(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progression = state
        .progression_tracker
        .get_my_progression(auth.user_id(), &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(progression))
}

#[get("/courses/{course_id}/progressions")]
pub async fn get_course_progressions(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progressions = state
        .progression_tracker
        .get_course_progressions(auth.user_id(), &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(progressions))
}
