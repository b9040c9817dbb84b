use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[post("/courses/{course_id}/enrollments")]
pub async fn enroll(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let enrollment = state
        .enrollment_service
        .enroll(auth.user_id(), &course_id)
        .await?;
    Ok(HttpResponse::Created().json(enrollment))
}

#[get("/courses/{course_id}/enrollments")]
pub async fn get_course_enrollments(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let enrollments = state
        .enrollment_service
        .get_course_enrollments(auth.user_id(), &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(enrollments))
}

#[get("/enrollments/me")]
pub async fn get_my_enrollments(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let enrollments = state
        .enrollment_service
        .get_my_enrollments(auth.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(enrollments))
}
