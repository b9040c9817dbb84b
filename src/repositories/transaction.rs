use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    ClientSession, Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Quiz, StudentProgression, Submission},
    repositories::submission_repository::{
        average_score_pipeline, distinct_quizzes_pipeline, read_average, read_count,
    },
};

/// The write side of a quiz submission, applied as one all-or-nothing unit.
///
/// Reads issued through the transaction observe its own uncommitted writes.
/// Dropping it without calling [`commit`](SubmissionTransaction::commit)
/// discards every write.
#[async_trait]
pub trait SubmissionTransaction: Send {
    async fn insert_submission(&mut self, submission: &Submission) -> AppResult<()>;
    async fn count_quizzes_in_course(&mut self, course_id: &str) -> AppResult<u64>;
    async fn count_distinct_quizzes(&mut self, student_id: &str, course_id: &str) -> AppResult<u64>;
    async fn average_score(&mut self, student_id: &str, course_id: &str) -> AppResult<Option<f64>>;
    async fn find_progression(
        &mut self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<StudentProgression>>;
    async fn save_progression(&mut self, progression: &StudentProgression) -> AppResult<()>;
    async fn commit(self: Box<Self>) -> AppResult<()>;
    async fn abort(self: Box<Self>) -> AppResult<()>;
}

#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn SubmissionTransaction>>;
}

pub struct MongoTransactionProvider {
    db: Database,
}

impl MongoTransactionProvider {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl TransactionProvider for MongoTransactionProvider {
    async fn begin(&self) -> AppResult<Box<dyn SubmissionTransaction>> {
        let session = self.db.start_transaction().await?;
        Ok(Box::new(MongoSubmissionTransaction {
            session,
            quizzes: self.db.get_collection("quizzes"),
            submissions: self.db.get_collection("submissions"),
            progressions: self.db.get_collection("student_progressions"),
        }))
    }
}

// The driver aborts an open transaction when the session is dropped.
pub struct MongoSubmissionTransaction {
    session: ClientSession,
    quizzes: Collection<Quiz>,
    submissions: Collection<Submission>,
    progressions: Collection<StudentProgression>,
}

impl MongoSubmissionTransaction {
    async fn aggregate_first(&mut self, pipeline: Vec<Document>) -> AppResult<Option<Document>> {
        let mut cursor = self
            .submissions
            .aggregate(pipeline)
            .session(&mut self.session)
            .await?;
        let results: Vec<Document> = cursor.stream(&mut self.session).try_collect().await?;
        Ok(results.into_iter().next())
    }
}

#[async_trait]
impl SubmissionTransaction for MongoSubmissionTransaction {
    async fn insert_submission(&mut self, submission: &Submission) -> AppResult<()> {
        self.submissions
            .insert_one(submission)
            .session(&mut self.session)
            .await?;
        Ok(())
    }

    async fn count_quizzes_in_course(&mut self, course_id: &str) -> AppResult<u64> {
        let count = self
            .quizzes
            .count_documents(doc! { "course_id": course_id })
            .session(&mut self.session)
            .await?;
        Ok(count)
    }

    async fn count_distinct_quizzes(&mut self, student_id: &str, course_id: &str) -> AppResult<u64> {
        let result = self
            .aggregate_first(distinct_quizzes_pipeline(student_id, course_id))
            .await?;
        Ok(read_count(result.as_ref()))
    }

    async fn average_score(&mut self, student_id: &str, course_id: &str) -> AppResult<Option<f64>> {
        let result = self
            .aggregate_first(average_score_pipeline(student_id, course_id))
            .await?;
        Ok(read_average(result.as_ref()))
    }

    async fn find_progression(
        &mut self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<StudentProgression>> {
        let progression = self
            .progressions
            .find_one(doc! { "student_id": student_id, "course_id": course_id })
            .session(&mut self.session)
            .await?;
        Ok(progression)
    }

    async fn save_progression(&mut self, progression: &StudentProgression) -> AppResult<()> {
        self.progressions
            .replace_one(
                doc! { "student_id": &progression.student_id, "course_id": &progression.course_id },
                progression,
            )
            .upsert(true)
            .session(&mut self.session)
            .await?;
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        self.session.commit_transaction().await?;
        Ok(())
    }

    async fn abort(mut self: Box<Self>) -> AppResult<()> {
        self.session.abort_transaction().await?;
        Ok(())
    }
}
