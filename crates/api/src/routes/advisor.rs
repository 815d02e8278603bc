//! Advisor routes: long-running plan generation via the external
//! text-generation gateway.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, middleware::auth::AuthUser};
use sprout_core::advisor::{AdvisorProfile, build_prompt};
use sprout_db::AdvisorRepository;
use sprout_db::entities::sea_orm_active_enums::TaskStatus;
use sprout_db::repositories::RecordExchangeInput;
use sprout_shared::AdvisorError;

/// Creates the advisor router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/advisor/tasks", post(create_task))
        .route("/advisor/tasks/{id}", get(get_task))
}

/// POST /advisor/tasks - Queue a plan generation task.
///
/// The gateway call runs in the background; poll the task endpoint for
/// the result.
async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    Json(profile): Json<AdvisorProfile>,
) -> impl IntoResponse {
    let repo = AdvisorRepository::new((*state.db).clone());

    let task = match repo.create_task(Some(user.user_id())).await {
        Ok(task) => task,
        Err(e) => {
            error!(error = %e, "Failed to create advisor task");
            return internal_error();
        }
    };

    let task_id = task.id;
    let prompt = build_prompt(&profile);
    let advisor = state.advisor.clone();

    tokio::spawn(async move {
        run_generation(&repo, &advisor, task_id, &prompt).await;
    });

    info!(task_id = %task_id, user_id = %user.user_id(), "Advisor task queued");

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "task_id": task_id,
            "status": task.status,
        })),
    )
        .into_response()
}

/// GET /advisor/tasks/{id} - Task status and result.
async fn get_task(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AdvisorRepository::new((*state.db).clone());

    match repo.find_task(task_id).await {
        Ok(Some(found)) => {
            let (plan, error_message) = found
                .exchange
                .map_or((None, None), |e| (e.plan, e.error_message));
            (
                StatusCode::OK,
                Json(json!({
                    "task_id": found.task.id,
                    "status": found.task.status,
                    "plan": plan,
                    "error": error_message,
                    "created_at": found.task.created_at,
                    "updated_at": found.task.updated_at,
                })),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "task_not_found",
                "message": "No such advisor task"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load advisor task");
            internal_error()
        }
    }
}

/// Drives one generation call and records the outcome. Runs detached;
/// failures are logged, never surfaced to the queuing request.
async fn run_generation(
    repo: &AdvisorRepository,
    advisor: &sprout_shared::AdvisorClient,
    task_id: Uuid,
    prompt: &str,
) {
    if let Err(e) = repo.set_status(task_id, TaskStatus::Processing).await {
        error!(task_id = %task_id, error = %e, "Failed to mark task processing");
        return;
    }

    let started = Instant::now();
    let outcome = advisor.generate_plan(prompt).await;
    let elapsed_ms = i32::try_from(started.elapsed().as_millis()).unwrap_or(i32::MAX);

    let (exchange, final_status) = match outcome {
        Ok(plan) => (
            RecordExchangeInput {
                task_id,
                plan: Some(plan),
                response_time_ms: elapsed_ms,
                success_code: 200,
                error_message: None,
            },
            TaskStatus::Completed,
        ),
        Err(e) => {
            warn!(task_id = %task_id, error = %e, "Advisor generation failed");
            let code = match e {
                AdvisorError::GatewayStatus(status) => i32::from(status),
                _ => 0,
            };
            (
                RecordExchangeInput {
                    task_id,
                    plan: None,
                    response_time_ms: elapsed_ms,
                    success_code: code,
                    error_message: Some(e.to_string()),
                },
                TaskStatus::Failed,
            )
        }
    };

    if let Err(e) = repo.record_exchange(exchange).await {
        error!(task_id = %task_id, error = %e, "Failed to record advisor exchange");
    }
    if let Err(e) = repo.set_status(task_id, final_status).await {
        error!(task_id = %task_id, error = %e, "Failed to finalize advisor task");
    }
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
