//! Gamification routes: daily check-in and the reward shop.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::auth::AuthUser};
use sprout_core::gamification::{CheckInSnapshot, GamificationError, StreakEngine};
use sprout_db::repositories::{CheckInError, RewardError};
use sprout_db::{CheckInRepository, RewardRepository};

/// Creates the gamification router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(check_in))
        .route("/check-in/history", get(check_in_history))
        .route("/rewards", get(list_rewards))
        .route("/rewards/claimed", get(claimed_rewards))
        .route("/rewards/{id}/redeem", post(redeem_reward))
}

/// POST /check-in - Record today's check-in and award points.
async fn check_in(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = CheckInRepository::new((*state.db).clone());
    let today = Utc::now().date_naive();

    let latest = match repo.find_latest(user.user_id()).await {
        Ok(row) => row.map(|r| CheckInSnapshot {
            date: r.check_in_date,
            streak: r.streak_count,
        }),
        Err(e) => {
            error!(error = %e, "Failed to load latest check-in");
            return internal_error();
        }
    };

    let award = match StreakEngine::check_in(latest, today, &state.gamification) {
        Ok(award) => award,
        Err(GamificationError::AlreadyCheckedIn(date)) => return already_checked_in(date),
        Err(e @ GamificationError::FutureDatedCheckIn { .. }) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "future_dated_check_in",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
    };

    // The unique constraint decides races; losing requests land here.
    let (row, total_points) = match repo
        .record_check_in(user.user_id(), today, award.streak, award.points_added)
        .await
    {
        Ok(result) => result,
        Err(CheckInError::AlreadyCheckedIn(date)) => return already_checked_in(date),
        Err(e) => {
            error!(error = %e, "Failed to record check-in");
            return internal_error();
        }
    };

    info!(
        user_id = %user.user_id(),
        streak = award.streak,
        points = award.points_added,
        "Check-in recorded"
    );

    (
        StatusCode::OK,
        Json(json!({
            "check_in_date": row.check_in_date,
            "streak": award.streak,
            "points_added": award.points_added,
            "total_points": total_points,
            "asset_url": award.asset_url,
        })),
    )
        .into_response()
}

/// GET /check-in/history - The user's check-in history, newest first.
async fn check_in_history(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = CheckInRepository::new((*state.db).clone());

    match repo.history(user.user_id()).await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "check_ins": rows }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load check-in history");
            internal_error()
        }
    }
}

/// GET /rewards - The reward catalog, cheapest first.
async fn list_rewards(State(state): State<AppState>, _user: AuthUser) -> impl IntoResponse {
    let repo = RewardRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(rewards) => (StatusCode::OK, Json(json!({ "rewards": rewards }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list rewards");
            internal_error()
        }
    }
}

/// GET /rewards/claimed - Rewards the user has redeemed.
async fn claimed_rewards(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = RewardRepository::new((*state.db).clone());

    match repo.claims_for_user(user.user_id()).await {
        Ok(claims) => {
            let claims: Vec<_> = claims
                .into_iter()
                .map(|(claim, reward)| {
                    json!({
                        "id": claim.id,
                        "reward": reward,
                        "claimed_at": claim.claimed_at,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "claimed": claims }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list claimed rewards");
            internal_error()
        }
    }
}

/// POST /rewards/{id}/redeem - Spend points on a reward.
async fn redeem_reward(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reward_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = RewardRepository::new((*state.db).clone());

    match repo.redeem(user.user_id(), reward_id).await {
        Ok((claim, total_points)) => {
            info!(user_id = %user.user_id(), reward_id = %reward_id, "Reward redeemed");
            (
                StatusCode::OK,
                Json(json!({
                    "claim_id": claim.id,
                    "reward_id": claim.reward_id,
                    "claimed_at": claim.claimed_at,
                    "total_points": total_points,
                })),
            )
                .into_response()
        }
        Err(RewardError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "reward_not_found",
                "message": "No such reward"
            })),
        )
            .into_response(),
        Err(RewardError::InsufficientPoints { needed, available }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "insufficient_points",
                "message": format!("Reward costs {needed} points, balance is {available}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to redeem reward");
            internal_error()
        }
    }
}

fn already_checked_in(date: chrono::NaiveDate) -> axum::response::Response {
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": "already_checked_in",
            "message": format!("Already checked in on {date}")
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
