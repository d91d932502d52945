// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{MethodRouter, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppError,
    handlers::{auth, quiz},
    state::AppState,
};

const AUTH_METHODS: &[Method] = &[Method::POST];

/// Answers any method outside `allowed` with a 405 listing the allowed ones.
/// Runs before extractors, so the 405 wins over a missing token.
fn restrict_methods(route: MethodRouter<AppState>, allowed: &'static [Method]) -> MethodRouter<AppState> {
    route.fallback(move |method: Method| async move { AppError::MethodNotAllowed { method, allowed } })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Merges the auth and quiz sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store handle, config).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let auth_routes = Router::new()
        .route("/register", restrict_methods(post(auth::register), AUTH_METHODS))
        .route("/login", restrict_methods(post(auth::login), AUTH_METHODS));

    let quiz_routes = Router::new()
        .route(
            "/api/quizzes",
            restrict_methods(
                post(quiz::create_quiz).get(quiz::list_quizzes),
                quiz::COLLECTION_METHODS,
            ),
        )
        .route(
            "/api/quizzes/{code}",
            restrict_methods(get(quiz::get_quiz), quiz::QUIZ_METHODS),
        )
        .route(
            "/api/quizzes/{code}/submit",
            restrict_methods(post(quiz::submit_quiz), quiz::SUBMIT_METHODS),
        );

    Router::new()
        .nest("/api/auth", auth_routes)
        .merge(quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{config::Config, repository::MemoryRepository};

    fn app() -> Router {
        let config = Config {
            database_url: None,
            jwt_secret: "routes_test_secret".to_string(),
            jwt_expiration: 600,
            server_address: "127.0.0.1:0".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string(), "not a\norigin".to_string()],
            rust_log: "error".to_string(),
        };
        create_router(AppState::new(Arc::new(MemoryRepository::new()), config))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn wrong_method_on_submit_is_405_with_allow() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/quizzes/ABCDEFGH/submit")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
        assert_eq!(body_json(response).await["error"], "Method GET Not Allowed");
    }

    #[tokio::test]
    async fn wrong_method_on_collection_beats_missing_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/quizzes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST, GET");
    }

    #[tokio::test]
    async fn listing_without_token_is_401_json() {
        let response = app()
            .oneshot(Request::builder().uri("/api/quizzes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
