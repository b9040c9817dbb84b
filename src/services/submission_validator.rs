use std::{collections::HashSet, sync::Arc};

use crate::{
    errors::{AppError, AppResult, ConflictKind, Resource},
    models::{
        domain::{Answer, Question, SubmissionAnswer},
        dto::request::SubmissionAnswerInput,
    },
    repositories::{AnswerRepository, QuestionRepository},
};

/// An answer set that passed every structural check against its quiz.
#[derive(Debug, Clone)]
pub struct ValidatedAnswerSet {
    pub total_questions: u64,
    pub answers: Vec<Answer>,
}

impl ValidatedAnswerSet {
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    pub fn to_rows(&self) -> Vec<SubmissionAnswer> {
        self.answers
            .iter()
            .map(|a| SubmissionAnswer {
                question_id: a.question_id.clone(),
                answer_id: a.id.clone(),
            })
            .collect()
    }
}

pub struct SubmissionValidator {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
}

impl SubmissionValidator {
    pub fn new(questions: Arc<dyn QuestionRepository>, answers: Arc<dyn AnswerRepository>) -> Self {
        Self { questions, answers }
    }

    /// Completeness and duplication, checked before any answer is resolved.
    pub fn check_shape(total_questions: u64, entries: &[SubmissionAnswerInput]) -> AppResult<()> {
        if entries.len() as u64 != total_questions {
            return Err(AppError::Conflict(ConflictKind::UnansweredQuestions));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.question_id.as_str()) {
                return Err(AppError::Conflict(ConflictKind::QuestionAlreadyAnswered));
            }
        }
        Ok(())
    }

    /// `owner` is the question the resolved answer actually belongs to.
    pub fn check_membership(
        quiz_id: &str,
        entry: &SubmissionAnswerInput,
        owner: &Question,
    ) -> AppResult<()> {
        if owner.quiz_id != quiz_id {
            return Err(AppError::Conflict(ConflictKind::AnswerNotInQuiz));
        }
        if owner.id != entry.question_id {
            return Err(AppError::Conflict(ConflictKind::AnswerNotInQuestion));
        }
        Ok(())
    }

    /// Read-only: resolves every entry and fails on the first bad one.
    pub async fn validate(
        &self,
        quiz_id: &str,
        entries: &[SubmissionAnswerInput],
    ) -> AppResult<ValidatedAnswerSet> {
        let total_questions = self.questions.count_by_quiz(quiz_id).await?;
        Self::check_shape(total_questions, entries)?;

        let mut answers = Vec::with_capacity(entries.len());
        for entry in entries {
            let answer = self
                .answers
                .find_by_id(&entry.answer_id)
                .await?
                .ok_or(AppError::NotFound(Resource::Answer))?;
            let owner = self
                .questions
                .find_by_id(&answer.question_id)
                .await?
                .ok_or(AppError::NotFound(Resource::Question))?;

            if let Err(err) = Self::check_membership(quiz_id, entry, &owner) {
                log::debug!(
                    "Rejected answer '{}' for question '{}' in quiz '{}': {}",
                    entry.answer_id,
                    entry.question_id,
                    quiz_id,
                    err
                );
                return Err(err);
            }
            answers.push(answer);
        }

        Ok(ValidatedAnswerSet {
            total_questions,
            answers,
        })
    }
}
