pub mod course_repository;
pub mod enrollment_repository;
pub mod question_repository;
pub mod quiz_repository;
pub mod student_progression_repository;
pub mod submission_repository;
pub mod transaction;

use mongodb::{
    bson::Document,
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
    IndexModel,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use enrollment_repository::{EnrollmentRepository, MongoEnrollmentRepository};
pub use question_repository::{
    AnswerRepository, MongoAnswerRepository, MongoQuestionRepository, QuestionRepository,
};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use student_progression_repository::{
    MongoStudentProgressionRepository, StudentProgressionRepository,
};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
pub use transaction::{MongoTransactionProvider, SubmissionTransaction, TransactionProvider};

pub(crate) fn index_model(keys: Document, name: &str, unique: bool) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(unique)
                .name(name.to_string())
                .build(),
        )
        .build()
}

/// True when a write was rejected by a unique index.
pub(crate) fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_failure_is_not_a_duplicate_key() {
        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ));
        assert!(!is_duplicate_key(&err));
    }
}
