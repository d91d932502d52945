// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{CreateUserRequest, LoginRequest},
    state::SharedStore,
    utils::{
        extract::AppJson,
        hash::{INVALID_CREDENTIALS, check_credentials, hash_password},
        jwt::sign_jwt,
    },
};

/// Registers a new quiz creator.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(store): State<SharedStore>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let user = store
        .insert_user(payload.username.trim(), &hashed_password)
        .await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a JWT token.
pub async fn login(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = store.find_user_by_username(payload.username.trim()).await?;
    check_credentials(&payload.password, user.as_ref().map(|u| u.password.as_str()))?;
    let Some(user) = user else {
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    };

    let token = sign_jwt(user.id, &user.username, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}
