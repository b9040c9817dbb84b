use crate::models::domain::Course;

pub const TEACHER_ID: &str = "teacher-1";
pub const STUDENT_ID: &str = "student-1";

pub mod fixtures {
    use super::*;
    use crate::{models::domain::Answer, services::ValidatedAnswerSet};

    /// A course owned by [`TEACHER_ID`]
    pub fn test_course() -> Course {
        Course::new("Rust 101", TEACHER_ID)
    }

    /// One resolved answer per question, correct where `correct[i]` is set.
    pub fn validated_answers(correct: &[bool]) -> ValidatedAnswerSet {
        ValidatedAnswerSet {
            total_questions: correct.len() as u64,
            answers: correct
                .iter()
                .enumerate()
                .map(|(i, c)| Answer::new("choice", *c, &format!("q-{}", i)))
                .collect(),
        }
    }
}

pub mod test_helpers {
    use actix_web::{dev::ServiceResponse, http::StatusCode, Error};

    /// Status of a test call, whether the service answered or failed.
    pub fn status_of<B>(result: Result<ServiceResponse<B>, Error>) -> StatusCode {
        match result {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_course() {
        let course = test_course();
        assert_eq!(course.created_by, super::TEACHER_ID);
    }

    #[test]
    fn test_fixtures_validated_answers() {
        let set = validated_answers(&[true, false, true]);
        assert_eq!(set.total_questions, 3);
        assert_eq!(set.correct_count(), 2);
        assert_eq!(set.answers[1].question_id, "q-1");
    }
}
