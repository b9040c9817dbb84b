use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Enrollment, StudentProgression, Submission};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDto {
    pub id: String,
    pub score: f64,
    pub submitted_at: DateTime<Utc>,
    pub quiz_id: String,
    pub student_id: String,
}

impl From<&Submission> for SubmissionDto {
    fn from(submission: &Submission) -> Self {
        SubmissionDto {
            id: submission.id.clone(),
            score: submission.score,
            submitted_at: submission.submitted_at,
            quiz_id: submission.quiz_id.clone(),
            student_id: submission.student_id.clone(),
        }
    }
}

impl From<Submission> for SubmissionDto {
    fn from(submission: Submission) -> Self {
        SubmissionDto::from(&submission)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionAnswerDetailsDto {
    pub question_id: String,
    pub question_text: String,
    pub chosen_answer_id: String,
    pub chosen_answer_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDetailsDto {
    pub id: String,
    pub score: f64,
    pub submitted_at: DateTime<Utc>,
    pub quiz_id: String,
    pub student_id: String,
    pub answers: Vec<SubmissionAnswerDetailsDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProgressionDto {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub percent: f64,
    pub average_score: f64,
}

impl From<StudentProgression> for StudentProgressionDto {
    fn from(progression: StudentProgression) -> Self {
        StudentProgressionDto {
            id: progression.id,
            student_id: progression.student_id,
            course_id: progression.course_id,
            percent: progression.percent,
            average_score: progression.average_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentDto {
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentDto {
    fn from(enrollment: Enrollment) -> Self {
        EnrollmentDto {
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}
