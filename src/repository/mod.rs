// src/repository/mod.rs

//! Persistence boundary.
//!
//! Handlers and services only see these traits. `PgRepository` backs a real
//! deployment, `MemoryRepository` backs development runs and tests.

use std::fmt;

use async_trait::async_trait;

use crate::models::{
    quiz::{NewQuiz, QuizDetail, QuizSummary, QuizWithQuestions},
    user::User,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

#[derive(Debug)]
pub enum StoreError {
    /// The generated share code is already taken. Callers may retry with a fresh code.
    DuplicateCode,
    DuplicateUsername(String),
    Database(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateCode => write!(f, "quiz code already exists"),
            StoreError::DuplicateUsername(name) => write!(f, "username '{}' already exists", name),
            StoreError::Database(e) => write!(f, "database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Inserts the quiz and all of its questions as one unit under `code`.
    /// Nothing is written when any part fails.
    async fn insert_quiz(&self, code: &str, quiz: &NewQuiz) -> Result<QuizWithQuestions, StoreError>;

    /// Exact, case-sensitive lookup. Questions come back ordered by `order`.
    async fn find_by_code(&self, code: &str) -> Result<Option<QuizDetail>, StoreError>;

    /// The creator's quizzes, newest first.
    async fn list_by_creator(&self, creator_id: i64) -> Result<Vec<QuizSummary>, StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Everything the application needs from persistence.
pub trait Store: QuizRepository + UserRepository {}

impl<T: QuizRepository + UserRepository> Store for T {}
