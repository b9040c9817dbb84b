use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub quiz_id: String,
    pub order: i32, // Position within the quiz
}

impl Question {
    pub fn new(text: &str, quiz_id: &str, order: i32) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            quiz_id: quiz_id.to_string(),
            order,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub correct: bool,
    pub question_id: String,
}

impl Answer {
    pub fn new(text: &str, correct: bool, question_id: &str) -> Self {
        Answer {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            correct,
            question_id: question_id.to_string(),
        }
    }
}
