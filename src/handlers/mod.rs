pub mod enrollment_handler;
pub mod progression_handler;
pub mod submission_handler;

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthMiddleware, errors::AppError};

#[get("/health")]
async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

/// Registers `/health` and the authenticated `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(submission_handler::submit_quiz)
            .service(submission_handler::get_my_quiz_submissions)
            .service(submission_handler::get_quiz_submissions)
            .service(submission_handler::get_submission)
            .service(progression_handler::get_my_progression)
            .service(progression_handler::get_course_progressions)
            .service(enrollment_handler::enroll)
            .service(enrollment_handler::get_course_enrollments)
            .service(enrollment_handler::get_my_enrollments),
    );
}
