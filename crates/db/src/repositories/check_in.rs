//! Check-in repository for daily streak database operations.

use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{daily_check_ins, users};

/// Error types for check-in operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckInError {
    /// A check-in row already exists for this user and date.
    #[error("Already checked in on {0}")]
    AlreadyCheckedIn(NaiveDate),

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Check-in repository for daily streak persistence.
#[derive(Debug, Clone)]
pub struct CheckInRepository {
    db: DatabaseConnection,
}

impl CheckInRepository {
    /// Creates a new check-in repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the most recent check-in for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_latest(
        &self,
        user_id: Uuid,
    ) -> Result<Option<daily_check_ins::Model>, DbErr> {
        daily_check_ins::Entity::find()
            .filter(daily_check_ins::Column::UserId.eq(user_id))
            .order_by_desc(daily_check_ins::Column::CheckInDate)
            .one(&self.db)
            .await
    }

    /// Finds a check-in for a specific date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<daily_check_ins::Model>, DbErr> {
        daily_check_ins::Entity::find()
            .filter(daily_check_ins::Column::UserId.eq(user_id))
            .filter(daily_check_ins::Column::CheckInDate.eq(date))
            .one(&self.db)
            .await
    }

    /// Records a check-in and awards points in one database transaction.
    ///
    /// The `UNIQUE(user_id, check_in_date)` constraint is the arbiter for
    /// concurrent requests: the first insert wins, every other request
    /// gets [`CheckInError::AlreadyCheckedIn`]. The points increment runs
    /// as a SQL expression so it never loses a concurrent update.
    ///
    /// Returns the inserted row and the user's new points balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the user already checked in on `date` or the
    /// database operation fails.
    pub async fn record_check_in(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        streak_count: i32,
        points: i32,
    ) -> Result<(daily_check_ins::Model, i32), CheckInError> {
        let txn = self.db.begin().await?;

        let check_in = daily_check_ins::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            check_in_date: Set(date),
            streak_count: Set(streak_count),
            created_at: Set(chrono::Utc::now().into()),
        };

        let inserted = match check_in.insert(&txn).await {
            Ok(model) => model,
            Err(err) => {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Err(CheckInError::AlreadyCheckedIn(date));
                }
                return Err(err.into());
            }
        };

        users::Entity::update_many()
            .col_expr(
                users::Column::TotalPoints,
                Expr::col(users::Column::TotalPoints).add(points),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(&txn)
            .await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or(CheckInError::UserNotFound(user_id))?;

        txn.commit().await?;

        Ok((inserted, user.total_points))
    }

    /// Lists a user's check-in history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<daily_check_ins::Model>, DbErr> {
        daily_check_ins::Entity::find()
            .filter(daily_check_ins::Column::UserId.eq(user_id))
            .order_by_desc(daily_check_ins::Column::CheckInDate)
            .all(&self.db)
            .await
    }
}
