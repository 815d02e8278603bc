//! User account and financial profile routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::auth::AuthUser};
use sprout_db::repositories::UpdateProfileInput;
use sprout_db::{ProfileRepository, UserRepository};
use sprout_shared::auth::UserInfo;

/// Creates the users router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(me))
        .route("/users/profile", get(get_profile).put(update_profile))
}

/// Request body for updating the financial profile.
#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    /// Age in years.
    age: Option<i32>,
    /// Occupation.
    job: Option<String>,
    /// Gross monthly salary.
    monthly_salary: Option<Decimal>,
    /// Named fixed costs, label to amount.
    fixed_costs: Option<std::collections::BTreeMap<String, Decimal>>,
    /// Free-form financial goals.
    financial_goals: Option<serde_json::Value>,
}

/// GET /users/me - Current user account info.
async fn me(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id()).await {
        Ok(Some(u)) => (
            StatusCode::OK,
            Json(json!(UserInfo {
                id: u.id,
                username: u.username,
                email: u.email,
                total_points: u.total_points,
                created_at: u.created_at.into(),
            })),
        )
            .into_response(),
        Ok(None) => user_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            internal_error()
        }
    }
}

/// GET /users/profile - Current user's financial profile.
async fn get_profile(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = ProfileRepository::new((*state.db).clone());

    match repo.find_by_user(user.user_id()).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(json!(profile))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "profile_not_found",
                "message": "No financial profile yet; submit one with PUT /users/profile"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            internal_error()
        }
    }
}

/// PUT /users/profile - Create or update the financial profile.
async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if let Some(salary) = payload.monthly_salary {
        if salary < Decimal::ZERO {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_input",
                    "message": "Monthly salary cannot be negative"
                })),
            )
                .into_response();
        }
    }

    let fixed_costs = match payload.fixed_costs.map(serde_json::to_value).transpose() {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Failed to serialize fixed costs");
            return internal_error();
        }
    };

    let repo = ProfileRepository::new((*state.db).clone());
    let input = UpdateProfileInput {
        age: payload.age,
        job: payload.job,
        monthly_salary: payload.monthly_salary,
        fixed_costs,
        financial_goals: payload.financial_goals,
    };

    match repo.upsert(user.user_id(), input).await {
        Ok(profile) => (StatusCode::OK, Json(json!(profile))).into_response(),
        Err(e) => {
            error!(error = %e, "Database error updating profile");
            internal_error()
        }
    }
}

fn user_not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "user_not_found",
            "message": "User no longer exists"
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An internal error occurred"
        })),
    )
        .into_response()
}
