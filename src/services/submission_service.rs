use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult, Resource},
    models::{
        domain::{Quiz, Submission},
        dto::{
            request::SubmissionAnswerInput,
            response::{SubmissionAnswerDetailsDto, SubmissionDetailsDto, SubmissionDto},
        },
    },
    repositories::{
        AnswerRepository, QuestionRepository, QuizRepository, SubmissionRepository,
        SubmissionTransaction, TransactionProvider,
    },
    services::{
        authorization_guard::AuthorizationGuard, progression_tracker::ProgressionTracker,
        scoring_engine::ScoringEngine, submission_validator::SubmissionValidator,
    },
};

pub struct SubmissionService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    transactions: Arc<dyn TransactionProvider>,
    guard: Arc<AuthorizationGuard>,
    validator: SubmissionValidator,
    tracker: Arc<ProgressionTracker>,
}

impl SubmissionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        transactions: Arc<dyn TransactionProvider>,
        guard: Arc<AuthorizationGuard>,
        tracker: Arc<ProgressionTracker>,
    ) -> Self {
        let validator = SubmissionValidator::new(questions.clone(), answers.clone());
        Self {
            quizzes,
            questions,
            answers,
            submissions,
            transactions,
            guard,
            validator,
            tracker,
        }
    }

    /// Validates and scores `answers` without writing anything, then stores
    /// the submission and refreshes the caller's progression in one
    /// transaction.
    pub async fn submit_quiz(
        &self,
        caller_id: &str,
        quiz_id: &str,
        answers: &[SubmissionAnswerInput],
    ) -> AppResult<SubmissionDto> {
        let quiz = self.load_quiz(quiz_id).await?;
        let course = self.guard.load_course(&quiz.course_id).await?;
        self.guard.require_enrolled(caller_id, &course).await?;

        let validated = self.validator.validate(&quiz.id, answers).await?;
        let score = ScoringEngine::score(&validated)?;
        let submission = Submission::new(
            &quiz.id,
            &course.id,
            caller_id,
            score,
            validated.to_rows(),
        );

        let mut tx = self.transactions.begin().await?;
        if let Err(err) = self.apply(tx.as_mut(), &submission).await {
            if let Err(abort_err) = tx.abort().await {
                log::warn!(
                    "Failed to abort transaction for submission '{}': {}",
                    submission.id,
                    abort_err
                );
            }
            return Err(err);
        }
        tx.commit().await?;

        log::info!(
            "Student '{}' submitted quiz '{}' with score {:.2}",
            caller_id,
            quiz.id,
            submission.score
        );
        Ok(SubmissionDto::from(&submission))
    }

    async fn apply(
        &self,
        tx: &mut dyn SubmissionTransaction,
        submission: &Submission,
    ) -> AppResult<()> {
        tx.insert_submission(submission).await?;
        self.tracker
            .update(tx, &submission.student_id, &submission.course_id)
            .await?;
        Ok(())
    }

    /// Visible to the course creator and to the student who submitted it.
    pub async fn get_submission(
        &self,
        caller_id: &str,
        submission_id: &str,
    ) -> AppResult<SubmissionDetailsDto> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Submission))?;
        let quiz = self.load_quiz(&submission.quiz_id).await?;
        let course = self.guard.load_course(&quiz.course_id).await?;

        if !AuthorizationGuard::is_creator(&course, caller_id) && submission.student_id != caller_id
        {
            log::warn!(
                "User '{}' may not view submission '{}'",
                caller_id,
                submission.id
            );
            return Err(AppError::AccessDenied);
        }

        // Rows follow the quiz's question order, not the order they were sent in.
        let mut rows = Vec::with_capacity(submission.answers.len());
        for question in self.questions.find_by_quiz(&quiz.id).await? {
            let Some(row) = submission.answer_for(&question.id) else {
                continue;
            };
            let answer = self
                .answers
                .find_by_id(&row.answer_id)
                .await?
                .ok_or(AppError::NotFound(Resource::Answer))?;
            rows.push(SubmissionAnswerDetailsDto {
                question_id: question.id,
                question_text: question.text,
                chosen_answer_id: answer.id,
                chosen_answer_text: answer.text,
                is_correct: answer.correct,
            });
        }

        Ok(SubmissionDetailsDto {
            id: submission.id,
            score: submission.score,
            submitted_at: submission.submitted_at,
            quiz_id: submission.quiz_id,
            student_id: submission.student_id,
            answers: rows,
        })
    }

    /// Every submission of the quiz, newest first. Course creator only.
    pub async fn get_quiz_submissions(
        &self,
        caller_id: &str,
        quiz_id: &str,
    ) -> AppResult<Vec<SubmissionDto>> {
        let quiz = self.load_quiz(quiz_id).await?;
        let course = self.guard.load_course(&quiz.course_id).await?;
        self.guard.require_creator(caller_id, &course)?;

        let submissions = self.submissions.find_by_quiz(&quiz.id, None).await?;
        Ok(submissions.into_iter().map(SubmissionDto::from).collect())
    }

    /// The caller's own submissions of the quiz, newest first.
    pub async fn get_my_quiz_submissions(
        &self,
        caller_id: &str,
        quiz_id: &str,
    ) -> AppResult<Vec<SubmissionDto>> {
        let quiz = self.load_quiz(quiz_id).await?;
        let course = self.guard.load_course(&quiz.course_id).await?;
        self.guard.require_enrolled(caller_id, &course).await?;

        let submissions = self
            .submissions
            .find_by_quiz(&quiz.id, Some(caller_id))
            .await?;
        Ok(submissions.into_iter().map(SubmissionDto::from).collect())
    }

    async fn load_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Quiz))
    }
}
