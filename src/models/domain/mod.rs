pub mod course;
pub mod enrollment;
pub mod question;
pub mod quiz;
pub mod student_progression;
pub mod submission;

pub use course::Course;
pub use enrollment::Enrollment;
pub use question::{Answer, Question};
pub use quiz::Quiz;
pub use student_progression::StudentProgression;
pub use submission::{Submission, SubmissionAnswer};
