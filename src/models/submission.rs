// src/models/submission.rs

use serde::{Deserialize, Serialize};

/// One answer in a participant's submission.
/// A `null` or missing `selectedAnswer` leaves the question unanswered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: i64,
    #[serde(default)]
    pub selected_answer: Option<String>,
}

/// DTO for submitting a quiz attempt.
/// `answers` need not cover every question.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Option<Vec<SubmittedAnswer>>,
}

/// Grading outcome for a single question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: i64,
    pub text: String,
    /// `None` when the question was left unanswered.
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Scored result of one submission. Computed per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub results: Vec<QuestionResult>,
    pub quiz_title: String,
}
