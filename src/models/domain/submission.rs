use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One attempt of a student answering every question of a quiz.
///
/// `course_id` is copied from the quiz so per-course aggregates can be
/// computed without a join. The score is final once the document exists.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    pub quiz_id: String,
    pub course_id: String,
    pub student_id: String,
    pub score: f64,
    pub answers: Vec<SubmissionAnswer>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub submitted_at: DateTime<Utc>,
}

/// The answer chosen for one question. Unique per question within a submission.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionAnswer {
    pub question_id: String,
    pub answer_id: String,
}

impl Submission {
    pub fn new(
        quiz_id: &str,
        course_id: &str,
        student_id: &str,
        score: f64,
        answers: Vec<SubmissionAnswer>,
    ) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            course_id: course_id.to_string(),
            student_id: student_id.to_string(),
            score,
            answers,
            submitted_at: Utc::now(),
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&SubmissionAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}
