//! Reward repository for the catalog and redemption operations.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{rewards, user_rewards, users};

/// Error types for reward operations.
#[derive(Debug, thiserror::Error)]
pub enum RewardError {
    /// Reward not found in the catalog.
    #[error("Reward not found: {0}")]
    NotFound(Uuid),

    /// The user's balance does not cover the reward cost.
    #[error("Insufficient points: need {needed}, have {available}")]
    InsufficientPoints {
        /// Cost of the reward.
        needed: i32,
        /// Balance at the time of the attempt.
        available: i32,
    },

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Reward repository for catalog reads and redemptions.
#[derive(Debug, Clone)]
pub struct RewardRepository {
    db: DatabaseConnection,
}

impl RewardRepository {
    /// Creates a new reward repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the reward catalog, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<rewards::Model>, DbErr> {
        rewards::Entity::find()
            .order_by_asc(rewards::Column::CostPoints)
            .all(&self.db)
            .await
    }

    /// Finds a reward by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<rewards::Model>, DbErr> {
        rewards::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists a user's claimed rewards, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn claims_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(user_rewards::Model, Option<rewards::Model>)>, DbErr> {
        user_rewards::Entity::find()
            .filter(user_rewards::Column::UserId.eq(user_id))
            .find_also_related(rewards::Entity)
            .order_by_desc(user_rewards::Column::ClaimedAt)
            .all(&self.db)
            .await
    }

    /// Redeems a reward, deducting its cost from the user's balance.
    ///
    /// The deduction is a conditional `UPDATE ... WHERE total_points >=
    /// cost` so two concurrent redemptions can never spend the same
    /// points twice. Returns the claim row and the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the reward does not exist, the balance is too
    /// low, or the database operation fails.
    pub async fn redeem(
        &self,
        user_id: Uuid,
        reward_id: Uuid,
    ) -> Result<(user_rewards::Model, i32), RewardError> {
        let reward = self
            .find_by_id(reward_id)
            .await?
            .ok_or(RewardError::NotFound(reward_id))?;

        let txn = self.db.begin().await?;

        let result = users::Entity::update_many()
            .col_expr(
                users::Column::TotalPoints,
                Expr::col(users::Column::TotalPoints).sub(reward.cost_points),
            )
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::TotalPoints.gte(reward.cost_points))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            let user = users::Entity::find_by_id(user_id)
                .one(&self.db)
                .await?
                .ok_or(RewardError::UserNotFound(user_id))?;
            return Err(RewardError::InsufficientPoints {
                needed: reward.cost_points,
                available: user.total_points,
            });
        }

        let claim = user_rewards::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            reward_id: Set(reward_id),
            claimed_at: Set(chrono::Utc::now().into()),
        };
        let claim = claim.insert(&txn).await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or(RewardError::UserNotFound(user_id))?;

        txn.commit().await?;

        Ok((claim, user.total_points))
    }
}
