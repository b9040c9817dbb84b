use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Entities a caller can reference by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Course,
    Quiz,
    Question,
    Answer,
    Submission,
    StudentProgression,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Course => "Course",
            Resource::Quiz => "Quiz",
            Resource::Question => "Question",
            Resource::Answer => "Answer",
            Resource::Submission => "Submission",
            Resource::StudentProgression => "Student progression",
        };
        f.write_str(name)
    }
}

/// Caller-supplied data that breaks a structural rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    UnansweredQuestions,
    QuestionAlreadyAnswered,
    AnswerNotInQuiz,
    AnswerNotInQuestion,
    StudentAlreadyEnrolled,
}

impl ConflictKind {
    pub fn message(&self) -> &'static str {
        match self {
            ConflictKind::UnansweredQuestions => "Every question of the quiz must be answered exactly once",
            ConflictKind::QuestionAlreadyAnswered => "A question was answered more than once",
            ConflictKind::AnswerNotInQuiz => "Answer does not belong to this quiz",
            ConflictKind::AnswerNotInQuestion => "Answer does not belong to the stated question",
            ConflictKind::StudentAlreadyEnrolled => "Student is already enrolled in this course",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(Resource),

    #[error("Access denied")]
    AccessDenied,

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AccessDenied => "ACCESS_DENIED",
            AppError::Conflict(ConflictKind::UnansweredQuestions) => "UNANSWERED_QUESTIONS",
            AppError::Conflict(ConflictKind::QuestionAlreadyAnswered) => "QUESTION_ALREADY_ANSWERED",
            AppError::Conflict(ConflictKind::AnswerNotInQuiz) => "ANSWER_NOT_IN_QUIZ",
            AppError::Conflict(ConflictKind::AnswerNotInQuestion) => "ANSWER_NOT_IN_QUESTION",
            AppError::Conflict(ConflictKind::StudentAlreadyEnrolled) => "STUDENT_ALREADY_ENROLLED",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::Conflict(ConflictKind::StudentAlreadyEnrolled) => StatusCode::CONFLICT,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::InternalError(format!("BSON deserialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
