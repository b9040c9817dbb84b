pub mod authorization_guard;
pub mod enrollment_service;
pub mod progression_tracker;
pub mod scoring_engine;
pub mod submission_service;
pub mod submission_validator;

pub use authorization_guard::AuthorizationGuard;
pub use enrollment_service::EnrollmentService;
pub use progression_tracker::ProgressionTracker;
pub use scoring_engine::ScoringEngine;
pub use submission_service::SubmissionService;
pub use submission_validator::{SubmissionValidator, ValidatedAnswerSet};
