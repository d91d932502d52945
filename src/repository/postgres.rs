// src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};

use crate::{
    models::{
        question::Question,
        quiz::{CreatorInfo, NewQuiz, Quiz, QuizDetail, QuizSummary, QuizWithQuestions},
        user::User,
    },
    repository::{QuizRepository, StoreError, UserRepository},
};

/// Postgres-backed store. Every call checks a connection out of the pool
/// and hands it back when the query or transaction finishes.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Helper struct for reading rows of the 'questions' table.
/// `order` is reserved in SQL, so the column is called `position`.
#[derive(FromRow)]
struct QuestionRow {
    id: i64,
    quiz_id: i64,
    text: String,
    options: Json<Vec<String>>,
    correct_answer: String,
    position: i32,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Self {
            id: row.id,
            quiz_id: row.quiz_id,
            text: row.text,
            options: row.options.0,
            correct_answer: row.correct_answer,
            order: row.position,
        }
    }
}

#[derive(FromRow)]
struct QuizWithCreatorRow {
    #[sqlx(flatten)]
    quiz: Quiz,
    creator_username: String,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[async_trait]
impl QuizRepository for PgRepository {
    async fn insert_quiz(&self, code: &str, new_quiz: &NewQuiz) -> Result<QuizWithQuestions, StoreError> {
        // Dropping `tx` without commit rolls everything back.
        let mut tx = self.pool.begin().await?;

        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (code, title, description, creator_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, code, title, description, creator_id, created_at
            "#,
        )
        .bind(code)
        .bind(&new_quiz.title)
        .bind(&new_quiz.description)
        .bind(new_quiz.creator_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateCode
            } else {
                StoreError::Database(e)
            }
        })?;

        let mut questions = Vec::with_capacity(new_quiz.questions.len());
        for q in &new_quiz.questions {
            let row = sqlx::query_as::<_, QuestionRow>(
                r#"
                INSERT INTO questions (quiz_id, text, options, correct_answer, position)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, quiz_id, text, options, correct_answer, position
                "#,
            )
            .bind(quiz.id)
            .bind(&q.text)
            .bind(Json(q.options.clone()))
            .bind(&q.correct_answer)
            .bind(q.order)
            .fetch_one(&mut *tx)
            .await?;

            questions.push(Question::from(row));
        }

        tx.commit().await?;

        Ok(QuizWithQuestions { quiz, questions })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<QuizDetail>, StoreError> {
        let row = sqlx::query_as::<_, QuizWithCreatorRow>(
            r#"
            SELECT
                q.id,
                q.code,
                q.title,
                q.description,
                q.creator_id,
                q.created_at,
                u.username AS creator_username
            FROM quizzes q
            JOIN users u ON u.id = q.creator_id
            WHERE q.code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let questions = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, quiz_id, text, options, correct_answer, position
            FROM questions
            WHERE quiz_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(row.quiz.id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Question::from)
        .collect();

        Ok(Some(QuizDetail {
            quiz: row.quiz,
            creator: CreatorInfo {
                username: row.creator_username,
            },
            questions,
        }))
    }

    async fn list_by_creator(&self, creator_id: i64) -> Result<Vec<QuizSummary>, StoreError> {
        let summaries = sqlx::query_as::<_, QuizSummary>(
            r#"
            SELECT
                q.id,
                q.code,
                q.title,
                q.description,
                q.created_at,
                COUNT(qs.id) AS question_count
            FROM quizzes q
            LEFT JOIN questions qs ON qs.quiz_id = q.id
            WHERE q.creator_id = $1
            GROUP BY q.id
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateUsername(username.to_string())
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
