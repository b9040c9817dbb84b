use serde::{Deserialize, Serialize};
use validator::Validate;

/// One `(question, chosen answer)` entry of a quiz submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct SubmissionAnswerInput {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,

    #[validate(length(min = 1, max = 64))]
    pub answer_id: String,
}

impl SubmissionAnswerInput {
    pub fn new(question_id: &str, answer_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            answer_id: answer_id.to_string(),
        }
    }
}

// Answer count is not checked here: a wrong count is reported as unanswered questions.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(nested)]
    pub answers: Vec<SubmissionAnswerInput>,
}
