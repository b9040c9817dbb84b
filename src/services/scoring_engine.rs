use crate::{
    errors::{AppError, AppResult},
    services::submission_validator::ValidatedAnswerSet,
};

pub struct ScoringEngine;

impl ScoringEngine {
    /// `100 * correct / total_questions`, unrounded.
    ///
    /// A quiz without questions has no defined score and is rejected.
    pub fn score(answers: &ValidatedAnswerSet) -> AppResult<f64> {
        if answers.total_questions == 0 {
            return Err(AppError::InternalError(
                "Quiz has no questions to score".to_string(),
            ));
        }
        Ok(answers.correct_count() as f64 / answers.total_questions as f64 * 100.0)
    }
}
