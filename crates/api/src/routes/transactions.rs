//! Transaction tracking routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::auth::AuthUser};
use sprout_db::TransactionRepository;
use sprout_db::entities::sea_orm_active_enums::{TransactionCategory, TransactionType};
use sprout_db::repositories::{CreateTransactionInput, TransactionFilter};
use sprout_shared::types::{PageRequest, PageResponse};

/// Creates the transactions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create).get(list))
        .route("/transactions/summary", get(summary))
}

/// Request body for recording a transaction.
#[derive(Debug, Deserialize)]
struct CreateTransactionRequest {
    /// Positive amount.
    amount: Decimal,
    /// Spending or income category.
    category: TransactionCategory,
    /// Direction of the movement.
    transaction_type: TransactionType,
    /// When the movement happened; defaults to now.
    transaction_date: Option<DateTime<Utc>>,
    /// Optional free-form note.
    description: Option<String>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Filter by direction.
    transaction_type: Option<TransactionType>,
    /// Filter by category.
    category: Option<TransactionCategory>,
    /// Inclusive lower bound on transaction date.
    date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on transaction date.
    date_to: Option<DateTime<Utc>>,
    /// Page number (1-indexed).
    page: Option<u32>,
    /// Items per page.
    per_page: Option<u32>,
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Deserialize)]
struct SummaryQuery {
    /// Inclusive lower bound on transaction date.
    date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on transaction date.
    date_to: Option<DateTime<Utc>>,
}

/// POST /transactions - Record a transaction.
async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    if payload.amount <= Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Transaction amount must be positive"
            })),
        )
            .into_response();
    }

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        user_id: user.user_id(),
        amount: payload.amount,
        category: payload.category,
        transaction_type: payload.transaction_type,
        transaction_date: payload.transaction_date.unwrap_or_else(Utc::now),
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(transaction) => (StatusCode::CREATED, Json(json!(transaction))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            internal_error()
        }
    }
}

/// GET /transactions - List transactions, newest first, paginated.
async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());
    let filter = TransactionFilter {
        transaction_type: query.transaction_type,
        category: query.category,
        date_from: query.date_from,
        date_to: query.date_to,
    };
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page).max(1),
        per_page: query.per_page.unwrap_or(defaults.per_page).clamp(1, 100),
    };

    match repo.list(user.user_id(), &filter, page.clone()).await {
        Ok((rows, total)) => (
            StatusCode::OK,
            Json(PageResponse::new(rows, page.page, page.per_page, total)),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error()
        }
    }
}

/// GET /transactions/summary - Income and expense totals for a period.
async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .summary(user.user_id(), query.date_from, query.date_to)
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute transaction summary");
            internal_error()
        }
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
