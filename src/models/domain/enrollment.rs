use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// Grants a student access to a course. Keyed by `(student_id, course_id)`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(student_id: &str, course_id: &str) -> Self {
        Enrollment {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            enrolled_at: Utc::now(),
        }
    }
}
