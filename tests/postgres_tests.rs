// tests/postgres_tests.rs
//
// Exercises `PgRepository` against a live database. Skipped when
// DATABASE_URL is not set.

use quizcode::{
    models::{question::NewQuestion, quiz::NewQuiz, user::User},
    repository::{PgRepository, QuizRepository, StoreError, UserRepository},
    services::code::generate_code,
};
use sqlx::postgres::PgPoolOptions;

async fn repository() -> Option<PgRepository> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres repository test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Some(PgRepository::new(pool))
}

async fn new_user(repo: &PgRepository) -> User {
    let username = format!("pg_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    repo.insert_user(&username, "not-a-real-hash")
        .await
        .expect("Failed to insert user")
}

fn question(text: &str, options: &[&str], correct: &str, order: i32) -> NewQuestion {
    NewQuestion {
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.to_string(),
        order,
    }
}

fn quiz(creator_id: i64, title: &str) -> NewQuiz {
    NewQuiz {
        title: title.to_string(),
        description: Some("Tom & Jerry".to_string()),
        creator_id,
        questions: vec![
            question("Capital of France?", &["Paris", "Lyon"], "Paris", 1),
            question("2 + 2?", &["3", "4", "5"], "4", 2),
            question("Largest ocean?", &["Pacific", "Atlantic"], "Pacific", 3),
        ],
    }
}

#[tokio::test]
async fn quiz_round_trips_with_questions_in_order() {
    let Some(repo) = repository().await else { return };
    let user = new_user(&repo).await;
    let code = generate_code();

    let created = repo.insert_quiz(&code, &quiz(user.id, "Round trip")).await.unwrap();
    assert_eq!(created.quiz.code, code);
    assert_eq!(created.questions.len(), 3);

    let found = repo.find_by_code(&code).await.unwrap().expect("quiz should exist");
    assert_eq!(found.quiz, created.quiz);
    assert_eq!(found.creator.username, user.username);
    assert_eq!(found.quiz.description.as_deref(), Some("Tom & Jerry"));

    let orders: Vec<i32> = found.questions.iter().map(|q| q.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(found.questions[1].options, vec!["3", "4", "5"]);
    assert_eq!(found.questions[1].correct_answer, "4");

    // Lookup is exact; normalization happens above the store
    assert!(repo.find_by_code(&code.to_lowercase()).await.unwrap().is_none());
}

#[tokio::test]
async fn taken_code_reports_duplicate_code() {
    let Some(repo) = repository().await else { return };
    let user = new_user(&repo).await;
    let code = generate_code();

    repo.insert_quiz(&code, &quiz(user.id, "First")).await.unwrap();
    let second = repo.insert_quiz(&code, &quiz(user.id, "Second")).await;
    assert!(matches!(second, Err(StoreError::DuplicateCode)));

    let found = repo.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(found.quiz.title, "First");
}

#[tokio::test]
async fn failed_question_insert_rolls_back_the_quiz() {
    let Some(repo) = repository().await else { return };
    let user = new_user(&repo).await;
    let code = generate_code();

    // Two questions at the same position trip questions_quiz_position_key
    // after the quiz row is already written inside the transaction.
    let mut broken = quiz(user.id, "Broken");
    broken.questions[2].order = 2;

    let result = repo.insert_quiz(&code, &broken).await;
    assert!(matches!(result, Err(StoreError::Database(_))));

    assert!(repo.find_by_code(&code).await.unwrap().is_none());
    assert!(repo.list_by_creator(user.id).await.unwrap().is_empty());

    // The code is free again
    assert!(repo.insert_quiz(&code, &quiz(user.id, "Fixed")).await.is_ok());
}

#[tokio::test]
async fn listing_is_scoped_newest_first_with_counts() {
    let Some(repo) = repository().await else { return };
    let alice = new_user(&repo).await;
    let bob = new_user(&repo).await;

    let mut short = quiz(alice.id, "Second");
    short.questions.truncate(1);

    repo.insert_quiz(&generate_code(), &quiz(alice.id, "First")).await.unwrap();
    repo.insert_quiz(&generate_code(), &short).await.unwrap();
    repo.insert_quiz(&generate_code(), &quiz(bob.id, "Bob's")).await.unwrap();

    let listed = repo.list_by_creator(alice.id).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);
    assert_eq!(listed[0].question_count, 1);
    assert_eq!(listed[1].question_count, 3);
}

#[tokio::test]
async fn usernames_are_unique() {
    let Some(repo) = repository().await else { return };
    let user = new_user(&repo).await;

    let again = repo.insert_user(&user.username, "other-hash").await;
    assert!(matches!(again, Err(StoreError::DuplicateUsername(name)) if name == user.username));

    let found = repo.find_user_by_username(&user.username).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(repo.find_user_by_username("no_such_user_here").await.unwrap().is_none());
}
