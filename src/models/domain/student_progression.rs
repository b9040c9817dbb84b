use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion and score aggregate for one student in one course.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StudentProgression {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub percent: f64,
    pub average_score: f64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl StudentProgression {
    pub fn new(student_id: &str, course_id: &str) -> Self {
        StudentProgression {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            percent: 0.0,
            average_score: 0.0,
            updated_at: Utc::now(),
        }
    }
}
