use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult, ConflictKind},
    models::{domain::Enrollment, dto::response::EnrollmentDto},
    repositories::EnrollmentRepository,
    services::authorization_guard::AuthorizationGuard,
};

pub struct EnrollmentService {
    enrollments: Arc<dyn EnrollmentRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl EnrollmentService {
    pub fn new(enrollments: Arc<dyn EnrollmentRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { enrollments, guard }
    }

    pub async fn enroll(&self, caller_id: &str, course_id: &str) -> AppResult<EnrollmentDto> {
        let course = self.guard.load_course(course_id).await?;

        if self.guard.is_enrolled(caller_id, &course.id).await? {
            return Err(AppError::Conflict(ConflictKind::StudentAlreadyEnrolled));
        }

        let enrollment = self
            .enrollments
            .create(Enrollment::new(caller_id, &course.id))
            .await?;

        log::info!("Student '{}' enrolled in course '{}'", caller_id, course.id);
        Ok(enrollment.into())
    }

    pub async fn get_my_enrollments(&self, caller_id: &str) -> AppResult<Vec<EnrollmentDto>> {
        let enrollments = self.enrollments.find_by_student(caller_id).await?;
        Ok(enrollments.into_iter().map(Into::into).collect())
    }

    /// Course members (creator or enrolled students) may list who else is enrolled.
    pub async fn get_course_enrollments(
        &self,
        caller_id: &str,
        course_id: &str,
    ) -> AppResult<Vec<EnrollmentDto>> {
        let course = self.guard.load_course(course_id).await?;
        self.guard.require_member(caller_id, &course).await?;

        let enrollments = self.enrollments.find_by_course(&course.id).await?;
        Ok(enrollments.into_iter().map(Into::into).collect())
    }
}
