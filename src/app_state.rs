use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAnswerRepository, MongoCourseRepository, MongoEnrollmentRepository,
        MongoQuestionRepository, MongoQuizRepository, MongoStudentProgressionRepository,
        MongoSubmissionRepository, MongoTransactionProvider,
    },
    services::{AuthorizationGuard, EnrollmentService, ProgressionTracker, SubmissionService},
};

#[derive(Clone)]
pub struct AppState {
    pub submission_service: Arc<SubmissionService>,
    pub progression_tracker: Arc<ProgressionTracker>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let courses = Arc::new(MongoCourseRepository::new(&db));
        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        let questions = Arc::new(MongoQuestionRepository::new(&db));
        let answers = Arc::new(MongoAnswerRepository::new(&db));
        let enrollments = Arc::new(MongoEnrollmentRepository::new(&db));
        let submissions = Arc::new(MongoSubmissionRepository::new(&db));
        let progressions = Arc::new(MongoStudentProgressionRepository::new(&db));

        courses.ensure_indexes().await?;
        quizzes.ensure_indexes().await?;
        questions.ensure_indexes().await?;
        answers.ensure_indexes().await?;
        enrollments.ensure_indexes().await?;
        submissions.ensure_indexes().await?;
        progressions.ensure_indexes().await?;

        let guard = Arc::new(AuthorizationGuard::new(courses, enrollments.clone()));
        let progression_tracker = Arc::new(ProgressionTracker::new(progressions, guard.clone()));
        let submission_service = Arc::new(SubmissionService::new(
            quizzes,
            questions,
            answers,
            submissions,
            Arc::new(MongoTransactionProvider::new(&db)),
            guard.clone(),
            progression_tracker.clone(),
        ));
        let enrollment_service = Arc::new(EnrollmentService::new(enrollments, guard));

        Ok(Self {
            submission_service,
            progression_tracker,
            enrollment_service,
            db,
            config: Arc::new(config),
        })
    }
}
