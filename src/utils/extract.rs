// src/utils/extract.rs

use axum::{
    extract::{FromRef, FromRequest, FromRequestParts},
    http::{header, request::Parts},
};

use crate::{config::Config, error::AppError, utils::jwt::verify_jwt};

/// `Json` with rejections reported as `{"error": ...}` 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// The authenticated caller, taken from `Authorization: Bearer <token>`.
/// Rejects with 401 when the header is missing or the token is invalid.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::AuthError("Unauthorized".to_string());

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(unauthorized)?;

        let config = Config::from_ref(state);
        let claims = verify_jwt(token, &config.jwt_secret).map_err(|_| unauthorized())?;
        let id = claims.sub.parse::<i64>().map_err(|_| unauthorized())?;

        Ok(AuthUser {
            id,
            username: claims.username,
        })
    }
}
