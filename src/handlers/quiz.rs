// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        quiz::{CreateQuizRequest, CreateQuizResponse},
        submission::SubmitQuizRequest,
    },
    services::quiz as quiz_service,
    state::SharedStore,
    utils::extract::{AppJson, AuthUser},
};

pub const COLLECTION_METHODS: &[Method] = &[Method::POST, Method::GET];
pub const QUIZ_METHODS: &[Method] = &[Method::GET];
pub const SUBMIT_METHODS: &[Method] = &[Method::POST];

/// Creates a quiz owned by the caller and issues its share code.
///
/// Returns 201 with the full quiz (answer keys included, the caller is its creator).
pub async fn create_quiz(
    State(store): State<SharedStore>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quiz_service::create_quiz(&*store, user.id, payload).await?;
    let code = quiz.quiz.code.clone();

    tracing::info!(
        "Quiz {} created by {} ({}) with {} questions",
        code,
        user.username,
        user.id,
        quiz.questions.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateQuizResponse {
            quiz,
            code,
            message: "Quiz created successfully",
        }),
    ))
}

/// Lists the caller's quizzes, newest first, with question counts.
pub async fn list_quizzes(
    State(store): State<SharedStore>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = quiz_service::list_quizzes(&*store, user.id).await?;
    Ok(Json(quizzes))
}

/// Returns a quiz for taking. Answer keys are stripped.
pub async fn get_quiz(
    State(store): State<SharedStore>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quiz_service::quiz_for_taking(&*store, &code).await?;
    Ok(Json(quiz))
}

/// Grades a participant's answers. The result is not stored.
pub async fn submit_quiz(
    State(store): State<SharedStore>,
    Path(code): Path<String>,
    AppJson(payload): AppJson<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = quiz_service::submit_answers(&*store, &code, payload).await?;
    Ok(Json(result))
}
