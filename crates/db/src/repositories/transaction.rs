//! Transaction repository for money movement database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use sprout_shared::types::PageRequest;
use uuid::Uuid;

use crate::entities::{
    sea_orm_active_enums::{TransactionCategory, TransactionType},
    transactions,
};

/// Input for recording a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Positive amount.
    pub amount: Decimal,
    /// Spending or income category.
    pub category: TransactionCategory,
    /// Direction of the movement.
    pub transaction_type: TransactionType,
    /// When the movement happened.
    pub transaction_date: DateTime<Utc>,
    /// Optional free-form note.
    pub description: Option<String>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by direction.
    pub transaction_type: Option<TransactionType>,
    /// Filter by category.
    pub category: Option<TransactionCategory>,
    /// Inclusive lower bound on transaction date.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on transaction date.
    pub date_to: Option<DateTime<Utc>>,
}

/// Aggregated income and spending over a period.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TransactionSummary {
    /// Sum of all income amounts.
    pub total_income: Decimal,
    /// Sum of all expense amounts.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub net: Decimal,
    /// Expense totals keyed by category.
    pub expense_by_category: Vec<(TransactionCategory, Decimal)>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, DbErr> {
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            amount: Set(input.amount),
            category: Set(input.category),
            transaction_type: Set(input.transaction_type),
            transaction_date: Set(input.transaction_date.into()),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now().into()),
        };

        transaction.insert(&self.db).await
    }

    /// Finds a transaction by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Lists transactions for a user, newest first, with the total count
    /// of rows matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), DbErr> {
        let query = Self::filtered(user_id, filter);
        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(transactions::Column::TransactionDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Computes income and expense totals for a user over an optional
    /// date range, with expenses broken down by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(
        &self,
        user_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<TransactionSummary, DbErr> {
        let filter = TransactionFilter {
            date_from,
            date_to,
            ..TransactionFilter::default()
        };
        let rows = Self::filtered(user_id, &filter).all(&self.db).await?;

        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut by_category: Vec<(TransactionCategory, Decimal)> = Vec::new();

        for row in rows {
            match row.transaction_type {
                TransactionType::Income => total_income += row.amount,
                TransactionType::Expense => {
                    total_expense += row.amount;
                    match by_category.iter_mut().find(|(c, _)| *c == row.category) {
                        Some((_, sum)) => *sum += row.amount,
                        None => by_category.push((row.category, row.amount)),
                    }
                }
            }
        }

        Ok(TransactionSummary {
            net: total_income - total_expense,
            total_income,
            total_expense,
            expense_by_category: by_category,
        })
    }

    fn filtered(user_id: Uuid, filter: &TransactionFilter) -> sea_orm::Select<transactions::Entity> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(ref transaction_type) = filter.transaction_type {
            query = query
                .filter(transactions::Column::TransactionType.eq(transaction_type.clone()));
        }
        if let Some(ref category) = filter.category {
            query = query.filter(transactions::Column::Category.eq(category.clone()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transactions::Column::TransactionDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(transactions::Column::TransactionDate.lte(to));
        }

        query
    }
}
