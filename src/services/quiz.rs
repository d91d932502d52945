// src/services/quiz.rs

use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::NewQuestion,
        quiz::{CreateQuizRequest, NewQuiz, PublicQuiz, QuizDetail, QuizSummary, QuizWithQuestions},
        submission::{QuizResult, SubmitQuizRequest},
    },
    repository::{QuizRepository, StoreError},
    services::{
        code::{generate_code, normalize_code},
        scoring::score_submission,
    },
};

/// How many fresh codes to try before giving up on a creation.
pub const CODE_GENERATION_ATTEMPTS: usize = 3;

const QUIZ_NOT_FOUND: &str = "Quiz not found";

/// Validates a creation request and turns it into a persistable quiz.
///
/// * Title and at least one question are required.
/// * Title and description are trimmed and otherwise stored as sent; escaping
///   is left to whatever renders them.
/// * Questions get `order` = 1-based input position.
/// * `correctAnswer` is resolved to the text of the option it designates.
pub fn prepare_quiz(creator_id: i64, req: CreateQuizRequest) -> Result<NewQuiz, AppError> {
    let title = req.title.trim().to_string();
    if title.is_empty() || req.questions.is_empty() {
        return Err(AppError::BadRequest("Title and questions are required".to_string()));
    }

    req.validate()?;

    let description = req
        .description
        .as_deref()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let mut questions = Vec::with_capacity(req.questions.len());
    for (index, q) in req.questions.into_iter().enumerate() {
        let position = index + 1;

        if q.text.trim().is_empty() {
            return Err(AppError::BadRequest(format!("Question {} text is required", position)));
        }

        let correct_answer = q
            .correct_answer
            .resolve(&q.options)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Question {} correct answer must match one of its options",
                    position
                ))
            })?
            .to_string();

        questions.push(NewQuestion {
            text: q.text,
            options: q.options,
            correct_answer,
            order: position as i32,
        });
    }

    Ok(NewQuiz {
        title,
        description,
        creator_id,
        questions,
    })
}

/// Creates a quiz under a freshly generated code.
///
/// A code collision reported by the store is retried with a new code, up to
/// `CODE_GENERATION_ATTEMPTS` times in total.
pub async fn create_quiz<R>(repo: &R, creator_id: i64, req: CreateQuizRequest) -> Result<QuizWithQuestions, AppError>
where
    R: QuizRepository + ?Sized,
{
    let new_quiz = prepare_quiz(creator_id, req)?;

    for attempt in 1..=CODE_GENERATION_ATTEMPTS {
        let code = generate_code();
        match repo.insert_quiz(&code, &new_quiz).await {
            Ok(created) => return Ok(created),
            Err(StoreError::DuplicateCode) => {
                tracing::warn!("Quiz code collision on {} (attempt {})", code, attempt);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::InternalServerError(format!(
        "Could not issue a unique quiz code after {} attempts",
        CODE_GENERATION_ATTEMPTS
    )))
}

/// Looks a quiz up by its share code, answer keys included.
pub async fn find_quiz<R>(repo: &R, raw_code: &str) -> Result<QuizDetail, AppError>
where
    R: QuizRepository + ?Sized,
{
    let code = normalize_code(raw_code).ok_or_else(|| AppError::NotFound(QUIZ_NOT_FOUND.to_string()))?;

    repo.find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound(QUIZ_NOT_FOUND.to_string()))
}

/// Fetches a quiz for taking. The payload never carries answer keys.
pub async fn quiz_for_taking<R>(repo: &R, raw_code: &str) -> Result<PublicQuiz, AppError>
where
    R: QuizRepository + ?Sized,
{
    let detail = find_quiz(repo, raw_code).await?;
    Ok(PublicQuiz::from(&detail))
}

/// Grades a submission. Nothing is stored.
pub async fn submit_answers<R>(repo: &R, raw_code: &str, req: SubmitQuizRequest) -> Result<QuizResult, AppError>
where
    R: QuizRepository + ?Sized,
{
    let answers = req
        .answers
        .ok_or_else(|| AppError::BadRequest("Answers are required".to_string()))?;

    let detail = find_quiz(repo, raw_code).await?;

    Ok(score_submission(&detail.quiz.title, &detail.questions, &answers))
}

pub async fn list_quizzes<R>(repo: &R, creator_id: i64) -> Result<Vec<QuizSummary>, AppError>
where
    R: QuizRepository + ?Sized,
{
    Ok(repo.list_by_creator(creator_id).await?)
}
