// src/repository/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    models::{
        question::Question,
        quiz::{CreatorInfo, NewQuiz, Quiz, QuizDetail, QuizSummary, QuizWithQuestions},
        user::User,
    },
    repository::{QuizRepository, StoreError, UserRepository},
};

#[derive(Default)]
struct Tables {
    next_user_id: i64,
    next_quiz_id: i64,
    next_question_id: i64,
    users: HashMap<i64, User>,
    quizzes: HashMap<i64, Quiz>,
    /// quiz id -> questions in `order`
    questions: HashMap<i64, Vec<Question>>,
}

/// In-process store. All tables sit behind one lock, so a quiz and its
/// questions become visible together.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for MemoryRepository {
    async fn insert_quiz(&self, code: &str, new_quiz: &NewQuiz) -> Result<QuizWithQuestions, StoreError> {
        let mut t = self.tables.write().await;

        if t.quizzes.values().any(|q| q.code == code) {
            return Err(StoreError::DuplicateCode);
        }

        t.next_quiz_id += 1;
        let quiz = Quiz {
            id: t.next_quiz_id,
            code: code.to_string(),
            title: new_quiz.title.clone(),
            description: new_quiz.description.clone(),
            creator_id: new_quiz.creator_id,
            created_at: Utc::now(),
        };

        let mut questions = Vec::with_capacity(new_quiz.questions.len());
        for nq in &new_quiz.questions {
            t.next_question_id += 1;
            questions.push(Question {
                id: t.next_question_id,
                quiz_id: quiz.id,
                text: nq.text.clone(),
                options: nq.options.clone(),
                correct_answer: nq.correct_answer.clone(),
                order: nq.order,
            });
        }
        questions.sort_by_key(|q| q.order);

        t.quizzes.insert(quiz.id, quiz.clone());
        t.questions.insert(quiz.id, questions.clone());

        Ok(QuizWithQuestions { quiz, questions })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<QuizDetail>, StoreError> {
        let t = self.tables.read().await;

        let Some(quiz) = t.quizzes.values().find(|q| q.code == code) else {
            return Ok(None);
        };

        let creator = CreatorInfo {
            username: t
                .users
                .get(&quiz.creator_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
        };
        let questions = t.questions.get(&quiz.id).cloned().unwrap_or_default();

        Ok(Some(QuizDetail {
            quiz: quiz.clone(),
            creator,
            questions,
        }))
    }

    async fn list_by_creator(&self, creator_id: i64) -> Result<Vec<QuizSummary>, StoreError> {
        let t = self.tables.read().await;

        let mut summaries: Vec<QuizSummary> = t
            .quizzes
            .values()
            .filter(|q| q.creator_id == creator_id)
            .map(|q| QuizSummary {
                id: q.id,
                code: q.code.clone(),
                title: q.title.clone(),
                description: q.description.clone(),
                created_at: q.created_at,
                question_count: t.questions.get(&q.id).map_or(0, |qs| qs.len() as i64),
            })
            .collect();

        // Ids break ties between quizzes created within the same clock tick.
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(summaries)
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut t = self.tables.write().await;

        if t.users.values().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        t.next_user_id += 1;
        let user = User {
            id: t.next_user_id,
            username: username.to_string(),
            password: password_hash.to_string(),
            created_at: Utc::now(),
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }
}
