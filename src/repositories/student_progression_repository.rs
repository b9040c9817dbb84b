use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::StudentProgression,
    repositories::index_model,
};

#[async_trait]
pub trait StudentProgressionRepository: Send + Sync {
    async fn find_by_student_and_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<StudentProgression>>;
    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<StudentProgression>>;
}

pub struct MongoStudentProgressionRepository {
    collection: Collection<StudentProgression>,
}

impl MongoStudentProgressionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("student_progressions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for student_progressions collection");

        self.collection
            .create_index(index_model(doc! { "id": 1 }, "id_unique", true))
            .await?;
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

        log::info!("Successfully created indexes for student_progressions collection");
        Ok(())
    }
}

#[async_trait]
impl StudentProgressionRepository for MongoStudentProgressionRepository {
    async fn find_by_student_and_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<StudentProgression>> {
        let progression = self
            .collection
            .find_one(doc! { "student_id": student_id, "course_id": course_id })
            .await?;
        Ok(progression)
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<StudentProgression>> {
        let progressions = self
            .collection
            .find(doc! { "course_id": course_id })
            .await?
            .try_collect()
            .await?;
        Ok(progressions)
    }
}
