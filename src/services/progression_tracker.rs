use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult, Resource},
    models::{domain::StudentProgression, dto::response::StudentProgressionDto},
    repositories::{StudentProgressionRepository, SubmissionTransaction},
    services::authorization_guard::AuthorizationGuard,
};

/// Share of a course's quizzes the student has submitted at least once.
pub fn completion_percent(submitted_quizzes: u64, total_quizzes: u64) -> f64 {
    if total_quizzes == 0 {
        return 0.0;
    }
    submitted_quizzes as f64 / total_quizzes as f64 * 100.0
}

/// Keeps one `StudentProgression` per (student, course).
///
/// Percent counts distinct quizzes, while the average counts every
/// submission, so resubmitting a quiz moves the average but not the percent.
pub struct ProgressionTracker {
    progressions: Arc<dyn StudentProgressionRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl ProgressionTracker {
    pub fn new(
        progressions: Arc<dyn StudentProgressionRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            progressions,
            guard,
        }
    }

    /// Recomputes the aggregate from scratch and upserts it within `tx`.
    pub async fn update(
        &self,
        tx: &mut dyn SubmissionTransaction,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<StudentProgression> {
        let total_quizzes = tx.count_quizzes_in_course(course_id).await?;
        let submitted_quizzes = tx.count_distinct_quizzes(student_id, course_id).await?;
        let average_score = tx.average_score(student_id, course_id).await?;

        let mut progression = tx
            .find_progression(student_id, course_id)
            .await?
            .unwrap_or_else(|| StudentProgression::new(student_id, course_id));

        progression.percent = completion_percent(submitted_quizzes, total_quizzes);
        progression.average_score = average_score.unwrap_or(0.0);
        progression.updated_at = Utc::now();

        tx.save_progression(&progression).await?;

        log::info!(
            "Progression for student '{}' in course '{}': {:.2}% complete, {:.2} average",
            student_id,
            course_id,
            progression.percent,
            progression.average_score
        );
        Ok(progression)
    }

    pub async fn get_my_progression(
        &self,
        caller_id: &str,
        course_id: &str,
    ) -> AppResult<StudentProgressionDto> {
        let course = self.guard.load_course(course_id).await?;
        self.guard.require_enrolled(caller_id, &course).await?;

        let progression = self
            .progressions
            .find_by_student_and_course(caller_id, &course.id)
            .await?
            .ok_or(AppError::NotFound(Resource::StudentProgression))?;

        Ok(progression.into())
    }

    /// Only students that submitted at least once have a row.
    pub async fn get_course_progressions(
        &self,
        caller_id: &str,
        course_id: &str,
    ) -> AppResult<Vec<StudentProgressionDto>> {
        let course = self.guard.load_course(course_id).await?;
        self.guard.require_creator(caller_id, &course)?;

        let progressions = self.progressions.find_by_course(&course.id).await?;
        Ok(progressions.into_iter().map(Into::into).collect())
    }
}
