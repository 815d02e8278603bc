//! Financial plan routes.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::auth::AuthUser};
use sprout_core::planner::{PlanGenerator, ProfileSnapshot};
use sprout_db::entities::sea_orm_active_enums::NodeStatus;
use sprout_db::repositories::{PlanError, PlanWithNodes, UpdateNodeInput};
use sprout_db::{PlanRepository, ProfileRepository};

const DEFAULT_PLAN_NAME: &str = "12-Month Savings Plan";

/// Creates the planner router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/planner/init", post(init_plan))
        .route("/planner/regenerate", post(regenerate_plan))
        .route("/planner/plans", get(list_plans))
        .route("/planner/plans/{id}", get(get_plan))
        .route("/planner/nodes/{id}", patch(update_node))
}

/// Request body for creating a plan.
#[derive(Debug, Deserialize, Default)]
struct InitPlanRequest {
    /// Display name; defaults when omitted.
    name: Option<String>,
}

/// Query parameters for regeneration.
#[derive(Debug, Deserialize)]
struct RegenerateQuery {
    /// The plan whose nodes are replaced.
    plan_id: Uuid,
}

/// Request body for updating a plan node.
#[derive(Debug, Deserialize)]
struct UpdateNodeRequest {
    /// New status.
    status: Option<NodeStatus>,
    /// New saved amount.
    current_amount: Option<Decimal>,
}

/// POST /planner/init - Generate the user's first plan.
///
/// Fails with 409 when an active plan already exists; use
/// `/planner/regenerate` to replace it.
async fn init_plan(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Option<Json<InitPlanRequest>>,
) -> impl IntoResponse {
    let plan_repo = PlanRepository::new((*state.db).clone());

    match plan_repo.find_active(user.user_id()).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "plan_exists",
                    "message": "An active plan already exists; use /planner/regenerate to replace it"
                })),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Failed to look up active plan");
            return internal_error();
        }
    }

    let name = payload
        .and_then(|Json(body)| body.name)
        .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string());

    let snapshot = match load_snapshot(&state, user.user_id()).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };
    let generated = PlanGenerator::generate(&snapshot, chrono::Utc::now());

    match plan_repo
        .replace_active_plan(user.user_id(), &name, &generated)
        .await
    {
        Ok(plan) => {
            info!(user_id = %user.user_id(), nodes = plan.nodes.len(), "Plan generated");
            (StatusCode::CREATED, plan_json(&plan)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to store generated plan");
            internal_error()
        }
    }
}

/// POST /planner/regenerate?plan_id= - Discard the plan's nodes and
/// rebuild them from the profile as it stands now.
///
/// The caller must own the plan; the plan id stays stable so clients
/// can keep their references.
async fn regenerate_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RegenerateQuery>,
) -> impl IntoResponse {
    let snapshot = match load_snapshot(&state, user.user_id()).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };
    let generated = PlanGenerator::generate(&snapshot, chrono::Utc::now());

    let plan_repo = PlanRepository::new((*state.db).clone());
    match plan_repo
        .regenerate(user.user_id(), query.plan_id, &generated)
        .await
    {
        Ok(plan) => {
            info!(user_id = %user.user_id(), plan_id = %query.plan_id, "Plan regenerated");
            (StatusCode::OK, plan_json(&plan)).into_response()
        }
        Err(PlanError::NotFound(_)) => plan_not_found(),
        Err(e) => {
            error!(error = %e, "Failed to regenerate plan");
            internal_error()
        }
    }
}

/// GET /planner/plans - All plans for the user, newest first.
async fn list_plans(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = PlanRepository::new((*state.db).clone());

    match repo.plans_for_user(user.user_id()).await {
        Ok(plans) => (StatusCode::OK, Json(json!({ "plans": plans }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list plans");
            internal_error()
        }
    }
}

/// GET /planner/plans/{id} - One plan with its nodes in chain order.
async fn get_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PlanRepository::new((*state.db).clone());

    match repo.find_with_nodes(user.user_id(), plan_id).await {
        Ok(plan) => (StatusCode::OK, plan_json(&plan)).into_response(),
        Err(PlanError::NotFound(_)) => plan_not_found(),
        Err(e) => {
            error!(error = %e, "Failed to load plan");
            internal_error()
        }
    }
}

/// PATCH /planner/nodes/{id} - Update a node's progress.
async fn update_node(
    State(state): State<AppState>,
    user: AuthUser,
    Path(node_id): Path<Uuid>,
    Json(payload): Json<UpdateNodeRequest>,
) -> impl IntoResponse {
    if let Some(amount) = payload.current_amount {
        if amount < Decimal::ZERO {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_amount",
                    "message": "Saved amount cannot be negative"
                })),
            )
                .into_response();
        }
    }

    let repo = PlanRepository::new((*state.db).clone());
    let input = UpdateNodeInput {
        status: payload.status,
        current_amount: payload.current_amount,
    };

    match repo.update_node(user.user_id(), node_id, input).await {
        Ok(node) => (StatusCode::OK, Json(json!(node))).into_response(),
        Err(PlanError::NodeNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "node_not_found",
                "message": "No such plan node"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update plan node");
            internal_error()
        }
    }
}

/// Reads the user's profile into a generator snapshot.
///
/// A missing profile becomes the default snapshot, which the generator
/// renders as a single incomplete-profile node rather than an error.
async fn load_snapshot(
    state: &AppState,
    user_id: Uuid,
) -> Result<ProfileSnapshot, axum::response::Response> {
    let profile_repo = ProfileRepository::new((*state.db).clone());

    match profile_repo.find_by_user(user_id).await {
        Ok(Some(profile)) => {
            let fixed_costs: BTreeMap<String, Decimal> =
                serde_json::from_value(profile.fixed_costs).map_err(|e| {
                    error!(error = %e, "Stored fixed costs are not a money map");
                    internal_error()
                })?;
            Ok(ProfileSnapshot {
                monthly_salary: profile.monthly_salary,
                fixed_costs,
            })
        }
        Ok(None) => Ok(ProfileSnapshot::default()),
        Err(e) => {
            error!(error = %e, "Failed to load profile");
            Err(internal_error())
        }
    }
}

fn plan_json(plan: &PlanWithNodes) -> Json<serde_json::Value> {
    Json(json!({
        "plan": plan.plan,
        "nodes": plan.nodes,
    }))
}

fn plan_not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "plan_not_found",
            "message": "No such plan"
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
