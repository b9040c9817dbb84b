use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult, Resource},
    models::domain::Course,
    repositories::{CourseRepository, EnrollmentRepository},
};

/// Answers "who is this caller to this course": its creator, an enrolled
/// student, or neither. Every service goes through here instead of
/// re-deriving ownership checks.
pub struct AuthorizationGuard {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl AuthorizationGuard {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            courses,
            enrollments,
        }
    }

    pub fn is_creator(course: &Course, user_id: &str) -> bool {
        course.created_by == user_id
    }

    pub async fn is_enrolled(&self, user_id: &str, course_id: &str) -> AppResult<bool> {
        self.enrollments.exists(user_id, course_id).await
    }

    pub async fn load_course(&self, course_id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Course))
    }

    pub fn require_creator(&self, user_id: &str, course: &Course) -> AppResult<()> {
        if !Self::is_creator(course, user_id) {
            log::warn!(
                "User '{}' is not the creator of course '{}'",
                user_id,
                course.id
            );
            return Err(AppError::AccessDenied);
        }
        Ok(())
    }

    pub async fn require_enrolled(&self, user_id: &str, course: &Course) -> AppResult<()> {
        if !self.is_enrolled(user_id, &course.id).await? {
            log::warn!("User '{}' is not enrolled in course '{}'", user_id, course.id);
            return Err(AppError::AccessDenied);
        }
        Ok(())
    }

    /// Passes for the course creator or any enrolled student.
    pub async fn require_member(&self, user_id: &str, course: &Course) -> AppResult<()> {
        if Self::is_creator(course, user_id) {
            return Ok(());
        }
        self.require_enrolled(user_id, course).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::{
            course_repository::MockCourseRepository,
            enrollment_repository::MockEnrollmentRepository,
        },
        test_utils::fixtures::test_course,
    };

    fn guard_with(enrolled: bool, course: Option<Course>) -> AuthorizationGuard {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(move |_| Ok(course.clone()));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_exists()
            .returning(move |_, _| Ok(enrolled));

        AuthorizationGuard::new(Arc::new(courses), Arc::new(enrollments))
    }

    #[test]
    fn test_is_creator_compares_owner() {
        let course = test_course();

        assert!(AuthorizationGuard::is_creator(&course, "teacher-1"));
        assert!(!AuthorizationGuard::is_creator(&course, "student-1"));
    }

    #[tokio::test]
    async fn test_require_enrolled_denies_outsider() {
        let course = test_course();
        let guard = guard_with(false, None);

        let result = guard.require_enrolled("student-1", &course).await;
        assert!(matches!(result, Err(AppError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_require_enrolled_allows_student() {
        let course = test_course();
        let guard = guard_with(true, None);

        assert!(guard.require_enrolled("student-1", &course).await.is_ok());
    }

    #[tokio::test]
    async fn test_creator_is_not_implicitly_enrolled() {
        let course = test_course();
        let guard = guard_with(false, None);

        assert!(guard.require_creator("teacher-1", &course).is_ok());
        assert!(guard.require_member("teacher-1", &course).await.is_ok());
        assert!(matches!(
            guard.require_enrolled("teacher-1", &course).await,
            Err(AppError::AccessDenied)
        ));
    }

    #[tokio::test]
    async fn test_load_course_reports_missing_course() {
        let guard = guard_with(true, None);

        let result = guard.load_course("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(Resource::Course))));
    }

    #[tokio::test]
    async fn test_load_course_returns_course() {
        let course = test_course();
        let guard = guard_with(true, Some(course.clone()));

        let loaded = guard.load_course(&course.id).await.expect("course exists");
        assert_eq!(loaded, course);
    }
}
