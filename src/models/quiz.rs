// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::question::{CreateQuestionRequest, NewQuestion, PublicQuestion, Question};

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,

    /// Public share code: 8 uppercase alphanumerics, unique across all quizzes.
    pub code: String,

    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Attribution shown to quiz takers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorInfo {
    pub username: String,
}

/// A quiz together with its questions, ordered by `order` ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

/// A quiz as fetched for taking or grading.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDetail {
    pub quiz: Quiz,
    pub creator: CreatorInfo,
    pub questions: Vec<Question>,
}

/// Sanitized quiz payload for untrusted consumers: no answer keys.
#[derive(Debug, Serialize)]
pub struct PublicQuiz {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub creator: CreatorInfo,
    pub questions: Vec<PublicQuestion>,
}

impl From<&QuizDetail> for PublicQuiz {
    fn from(detail: &QuizDetail) -> Self {
        Self {
            quiz: detail.quiz.clone(),
            creator: detail.creator.clone(),
            questions: detail.questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}

/// Row of the creator's dashboard listing.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub question_count: i64,
}

/// DTO for creating a new quiz.
///
/// Missing `title`/`questions` deserialize to empty values so the service
/// can reject them with a single, stable message.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Title must be at most 200 characters."))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "A quiz can have at most 100 questions."), nested)]
    pub questions: Vec<CreateQuestionRequest>,
}

/// A validated quiz ready to be persisted. The code is assigned at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuiz {
    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub questions: Vec<NewQuestion>,
}

/// Response body for a successful creation.
#[derive(Debug, Serialize)]
pub struct CreateQuizResponse {
    pub quiz: QuizWithQuestions,
    pub code: String,
    pub message: &'static str,
}
