#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use learnify_server::{
    errors::{AppError, AppResult, ConflictKind},
    models::{
        domain::{
            Answer, Course, Enrollment, Question, Quiz, StudentProgression, Submission,
        },
        dto::request::SubmissionAnswerInput,
    },
    repositories::{
        AnswerRepository, CourseRepository, EnrollmentRepository, QuestionRepository,
        QuizRepository, StudentProgressionRepository, SubmissionRepository,
        SubmissionTransaction, TransactionProvider,
    },
    services::{AuthorizationGuard, EnrollmentService, ProgressionTracker, SubmissionService},
};

#[derive(Default)]
struct State {
    courses: HashMap<String, Course>,
    quizzes: HashMap<String, Quiz>,
    questions: HashMap<String, Question>,
    answers: HashMap<String, Answer>,
    enrollments: Vec<Enrollment>,
    submissions: Vec<Submission>,
    progressions: HashMap<(String, String), StudentProgression>,
}

fn distinct_quizzes<'a>(
    submissions: impl Iterator<Item = &'a Submission>,
    student_id: &str,
    course_id: &str,
) -> u64 {
    submissions
        .filter(|s| s.student_id == student_id && s.course_id == course_id)
        .map(|s| s.quiz_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64
}

fn average<'a>(
    submissions: impl Iterator<Item = &'a Submission>,
    student_id: &str,
    course_id: &str,
) -> Option<f64> {
    let scores: Vec<f64> = submissions
        .filter(|s| s.student_id == student_id && s.course_id == course_id)
        .map(|s| s.score)
        .collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Every repository and the transaction provider over one shared map set.
#[derive(Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    fail_progression_save: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_progression_saves(&self) {
        self.fail_progression_save.store(true, Ordering::SeqCst);
    }

    pub async fn add_course(&self, created_by: &str) -> Course {
        let course = Course::new("Course", created_by);
        self.state
            .write()
            .await
            .courses
            .insert(course.id.clone(), course.clone());
        course
    }

    pub async fn add_quiz(&self, course_id: &str) -> Quiz {
        let quiz = Quiz::new("Quiz", course_id);
        self.state
            .write()
            .await
            .quizzes
            .insert(quiz.id.clone(), quiz.clone());
        quiz
    }

    pub async fn add_question(&self, quiz_id: &str, order: i32) -> Question {
        let question = Question::new(&format!("Question {}", order), quiz_id, order);
        self.state
            .write()
            .await
            .questions
            .insert(question.id.clone(), question.clone());
        question
    }

    pub async fn add_answer(&self, question_id: &str, correct: bool) -> Answer {
        let text = if correct { "right" } else { "wrong" };
        let answer = Answer::new(text, correct, question_id);
        self.state
            .write()
            .await
            .answers
            .insert(answer.id.clone(), answer.clone());
        answer
    }

    pub async fn enroll(&self, student_id: &str, course_id: &str) {
        self.state
            .write()
            .await
            .enrollments
            .push(Enrollment::new(student_id, course_id));
    }

    pub async fn put_progression(&self, progression: StudentProgression) {
        self.state.write().await.progressions.insert(
            (progression.student_id.clone(), progression.course_id.clone()),
            progression,
        );
    }

    pub async fn submission_count(&self) -> usize {
        self.state.read().await.submissions.len()
    }

    pub async fn progression_count(&self) -> usize {
        self.state.read().await.progressions.len()
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.state.read().await.courses.get(id).cloned())
    }
}

#[async_trait]
impl QuizRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.state.read().await.quizzes.get(id).cloned())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        Ok(self.state.read().await.questions.get(id).cloned())
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let state = self.state.read().await;
        let mut questions: Vec<_> = state
            .questions
            .values()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order);
        Ok(questions)
    }

    async fn count_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let state = self.state.read().await;
        Ok(state
            .questions
            .values()
            .filter(|q| q.quiz_id == quiz_id)
            .count() as u64)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Answer>> {
        Ok(self.state.read().await.answers.get(id).cloned())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn exists(&self, student_id: &str, course_id: &str) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id))
    }

    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        let mut state = self.state.write().await;
        if state
            .enrollments
            .iter()
            .any(|e| e.student_id == enrollment.student_id && e.course_id == enrollment.course_id)
        {
            return Err(AppError::Conflict(ConflictKind::StudentAlreadyEnrolled));
        }
        state.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Enrollment>> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Enrollment>> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let state = self.state.read().await;
        Ok(state.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_quiz(
        &self,
        quiz_id: &str,
        student_id: Option<&str>,
    ) -> AppResult<Vec<Submission>> {
        let state = self.state.read().await;
        let mut items: Vec<_> = state
            .submissions
            .iter()
            .filter(|s| s.quiz_id == quiz_id && student_id.map(|sid| s.student_id == sid).unwrap_or(true))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(items)
    }
}

#[async_trait]
impl StudentProgressionRepository for InMemoryStore {
    async fn find_by_student_and_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<StudentProgression>> {
        let state = self.state.read().await;
        Ok(state
            .progressions
            .get(&(student_id.to_string(), course_id.to_string()))
            .cloned())
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<StudentProgression>> {
        let state = self.state.read().await;
        Ok(state
            .progressions
            .values()
            .filter(|p| p.course_id == course_id)
            .cloned()
            .collect())
    }
}

/// Stages writes and publishes them to the store only on commit.
pub struct InMemoryTransaction {
    state: Arc<RwLock<State>>,
    fail_progression_save: bool,
    staged_submissions: Vec<Submission>,
    staged_progressions: Vec<StudentProgression>,
}

#[async_trait]
impl SubmissionTransaction for InMemoryTransaction {
    async fn insert_submission(&mut self, submission: &Submission) -> AppResult<()> {
        self.staged_submissions.push(submission.clone());
        Ok(())
    }

    async fn count_quizzes_in_course(&mut self, course_id: &str) -> AppResult<u64> {
        let state = self.state.read().await;
        Ok(state
            .quizzes
            .values()
            .filter(|q| q.course_id == course_id)
            .count() as u64)
    }

    async fn count_distinct_quizzes(&mut self, student_id: &str, course_id: &str) -> AppResult<u64> {
        let state = self.state.read().await;
        let all = state.submissions.iter().chain(self.staged_submissions.iter());
        Ok(distinct_quizzes(all, student_id, course_id))
    }

    async fn average_score(&mut self, student_id: &str, course_id: &str) -> AppResult<Option<f64>> {
        let state = self.state.read().await;
        let all = state.submissions.iter().chain(self.staged_submissions.iter());
        Ok(average(all, student_id, course_id))
    }

    async fn find_progression(
        &mut self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<StudentProgression>> {
        if let Some(staged) = self
            .staged_progressions
            .iter()
            .find(|p| p.student_id == student_id && p.course_id == course_id)
        {
            return Ok(Some(staged.clone()));
        }
        let state = self.state.read().await;
        Ok(state
            .progressions
            .get(&(student_id.to_string(), course_id.to_string()))
            .cloned())
    }

    async fn save_progression(&mut self, progression: &StudentProgression) -> AppResult<()> {
        if self.fail_progression_save {
            return Err(AppError::DatabaseError("write conflict".to_string()));
        }
        self.staged_progressions
            .retain(|p| !(p.student_id == progression.student_id && p.course_id == progression.course_id));
        self.staged_progressions.push(progression.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let InMemoryTransaction {
            state,
            staged_submissions,
            staged_progressions,
            ..
        } = *self;
        let mut state = state.write().await;
        state.submissions.extend(staged_submissions);
        for progression in staged_progressions {
            state.progressions.insert(
                (progression.student_id.clone(), progression.course_id.clone()),
                progression,
            );
        }
        Ok(())
    }

    async fn abort(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl TransactionProvider for InMemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn SubmissionTransaction>> {
        Ok(Box::new(InMemoryTransaction {
            state: self.state.clone(),
            fail_progression_save: self.fail_progression_save.load(Ordering::SeqCst),
            staged_submissions: Vec::new(),
            staged_progressions: Vec::new(),
        }))
    }
}

pub struct Services {
    pub submissions: SubmissionService,
    pub progressions: Arc<ProgressionTracker>,
    pub enrollments: EnrollmentService,
}

pub fn services(store: &Arc<InMemoryStore>) -> Services {
    let guard = Arc::new(AuthorizationGuard::new(store.clone(), store.clone()));
    let progressions = Arc::new(ProgressionTracker::new(store.clone(), guard.clone()));
    let submissions = SubmissionService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        guard.clone(),
        progressions.clone(),
    );
    let enrollments = EnrollmentService::new(store.clone(), guard);

    Services {
        submissions,
        progressions,
        enrollments,
    }
}

pub const TEACHER: &str = "teacher-1";
pub const STUDENT: &str = "student-1";

pub struct QuestionFixture {
    pub question: Question,
    pub correct: Answer,
    pub incorrect: Answer,
}

pub struct QuizFixture {
    pub quiz: Quiz,
    pub questions: Vec<QuestionFixture>,
}

impl QuizFixture {
    /// One entry per question, picking the correct answer where `pick_correct[i]`.
    pub fn answers(&self, pick_correct: &[bool]) -> Vec<SubmissionAnswerInput> {
        self.questions
            .iter()
            .zip(pick_correct)
            .map(|(q, correct)| {
                let answer = if *correct { &q.correct } else { &q.incorrect };
                SubmissionAnswerInput::new(&q.question.id, &answer.id)
            })
            .collect()
    }
}

pub async fn seed_quiz(store: &InMemoryStore, course_id: &str, question_count: i32) -> QuizFixture {
    let quiz = store.add_quiz(course_id).await;
    let mut questions = Vec::new();
    for order in 1..=question_count {
        let question = store.add_question(&quiz.id, order).await;
        let correct = store.add_answer(&question.id, true).await;
        let incorrect = store.add_answer(&question.id, false).await;
        questions.push(QuestionFixture {
            question,
            correct,
            incorrect,
        });
    }
    QuizFixture { quiz, questions }
}
