use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult, ConflictKind},
    models::domain::Enrollment,
    repositories::{index_model, is_duplicate_key},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn exists(&self, student_id: &str, course_id: &str) -> AppResult<bool>;
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment>;
    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Enrollment>>;
    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Enrollment>>;
}

pub struct MongoEnrollmentRepository {
    collection: Collection<Enrollment>,
}

impl MongoEnrollmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("enrollments");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for enrollments collection");

        self.collection
            .create_index(index_model(
                doc! { "student_id": 1, "course_id": 1 },
                "student_course_unique",
                true,
            ))
            .await?;
        self.collection
            .create_index(index_model(doc! { "course_id": 1 }, "course_id", false))
            .await?;

        log::info!("Successfully created indexes for enrollments collection");
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for MongoEnrollmentRepository {
    async fn exists(&self, student_id: &str, course_id: &str) -> AppResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "student_id": student_id, "course_id": course_id })
            .await?;
        Ok(count > 0)
    }

    /// A concurrent enroll that loses the race on the unique index is
    /// reported as a conflict, not a database failure.
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        match self.collection.insert_one(&enrollment).await {
            Ok(_) => Ok(enrollment),
            Err(err) if is_duplicate_key(&err) => {
                log::debug!(
                    "Enrollment of '{}' in course '{}' already exists",
                    enrollment.student_id,
                    enrollment.course_id
                );
                Err(AppError::Conflict(ConflictKind::StudentAlreadyEnrolled))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Enrollment>> {
        let enrollments = self
            .collection
            .find(doc! { "student_id": student_id })
            .sort(doc! { "enrolled_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(enrollments)
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Enrollment>> {
        let enrollments = self
            .collection
            .find(doc! { "course_id": course_id })
            .sort(doc! { "enrolled_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(enrollments)
    }
}
