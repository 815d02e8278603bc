//! Authentication routes for registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use sprout_core::auth::{hash_password, verify_password};
use sprout_db::UserRepository;
use sprout_shared::auth::{LoginRequest, RegisterRequest, TokenResponse, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    if payload.username.trim().is_empty() || payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_input",
                "message": "Username is required and password must be at least 8 characters"
            })),
        )
            .into_response();
    }

    match user_repo.username_exists(&payload.username).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "username_exists",
                    "message": "An account with this username already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking username");
            return internal_error("An error occurred during registration");
        }
    }

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("An error occurred during registration");
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration");
        }
    };

    let user = match user_repo
        .create(&payload.username, &payload.email, &password_hash)
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration");
        }
    };

    info!(user_id = %user.id, username = %user.username, "New user registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "user": UserInfo {
                id: user.id,
                username: user.username,
                email: user.email,
                total_points: user.total_points,
                created_at: user.created_at.into(),
            }
        })),
    )
        .into_response()
}

/// POST /auth/login - Authenticate user and return an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_username(&payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %payload.username, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    }

    let access_token = match state.jwt_service.generate_access_token(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during login");
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    (
        StatusCode::OK,
        Json(TokenResponse {
            access_token,
            token_type: "bearer",
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid username or password"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}
