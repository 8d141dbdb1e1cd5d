use anyhow::Context;
use axum::{Json, Router, extract::State, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Exchanges username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepository::new(&state.db)
        .find_by_username(payload.username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password_valid = bcrypt::verify(&payload.password, &user.password_hash)
        .context("Password verification failed")?;
    if !password_valid {
        tracing::info!(username = %user.username, "Rejected login");
        return Err(AppError::InvalidCredentials);
    }

    let expires_in = state.config.jwt_expires_in;
    let access_token = JwtManager::new(state.config.jwt_secret.as_str())
        .create_jwt(&user, expires_in)
        .context("Failed to create token")?;

    tracing::info!(username = %user.username, role = ?user.role, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        role: user.role,
        full_name: user.full_name(),
    }))
}
