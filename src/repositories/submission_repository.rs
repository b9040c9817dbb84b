use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Submission,
    repositories::index_model,
};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    /// Submissions of a quiz, newest first, optionally limited to one student.
    async fn find_by_quiz(
        &self,
        quiz_id: &str,
        student_id: Option<&str>,
    ) -> AppResult<Vec<Submission>>;
}

/// `$match` + `$group` by quiz + `$count`: number of distinct quizzes submitted.
pub(crate) fn distinct_quizzes_pipeline(student_id: &str, course_id: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "student_id": student_id, "course_id": course_id } },
        doc! { "$group": { "_id": "$quiz_id" } },
        doc! { "$count": "count" },
    ]
}

pub(crate) fn average_score_pipeline(student_id: &str, course_id: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "student_id": student_id, "course_id": course_id } },
        doc! { "$group": { "_id": Bson::Null, "avg": { "$avg": "$score" } } },
    ]
}

pub(crate) fn read_count(result: Option<&Document>) -> u64 {
    match result.and_then(|d| d.get("count")) {
        Some(Bson::Int32(n)) => *n as u64,
        Some(Bson::Int64(n)) => *n as u64,
        _ => 0,
    }
}

pub(crate) fn read_average(result: Option<&Document>) -> Option<f64> {
    result.and_then(|d| d.get("avg")).and_then(Bson::as_f64)
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("submissions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        self.collection
            .create_index(index_model(doc! { "id": 1 }, "id_unique", true))
            .await?;
        self.collection
            .create_index(index_model(
                doc! { "quiz_id": 1, "student_id": 1, "submitted_at": -1 },
                "quiz_student_submitted",
                false,
            ))
            .await?;
        self.collection
            .create_index(index_model(
                doc! { "student_id": 1, "course_id": 1 },
                "student_course",
                false,
            ))
            .await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn find_by_quiz(
        &self,
        quiz_id: &str,
        student_id: Option<&str>,
    ) -> AppResult<Vec<Submission>> {
        let mut filter = doc! { "quiz_id": quiz_id };

        if let Some(sid) = student_id {
            filter.insert("student_id", sid);
        }

        let submissions = self
            .collection
            .find(filter)
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(submissions)
    }
}
