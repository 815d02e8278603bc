//! Profile repository for financial profile database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::profiles;

/// Input for updating a user's financial profile.
///
/// `None` fields are left unchanged on an existing profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// Age in years.
    pub age: Option<i32>,
    /// Occupation.
    pub job: Option<String>,
    /// Gross monthly salary.
    pub monthly_salary: Option<Decimal>,
    /// Named fixed costs, category to amount.
    pub fixed_costs: Option<serde_json::Value>,
    /// Free-form financial goals.
    pub financial_goals: Option<serde_json::Value>,
}

/// Profile repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the profile for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<profiles::Model>, DbErr> {
        profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates the profile if it does not exist, otherwise applies the
    /// provided fields on top of the stored ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<profiles::Model, DbErr> {
        let now = chrono::Utc::now().into();

        match self.find_by_user(user_id).await? {
            Some(existing) => {
                let mut profile: profiles::ActiveModel = existing.into();
                if let Some(age) = input.age {
                    profile.age = Set(Some(age));
                }
                if let Some(job) = input.job {
                    profile.job = Set(Some(job));
                }
                if let Some(salary) = input.monthly_salary {
                    profile.monthly_salary = Set(Some(salary));
                }
                if let Some(costs) = input.fixed_costs {
                    profile.fixed_costs = Set(costs);
                }
                if let Some(goals) = input.financial_goals {
                    profile.financial_goals = Set(goals);
                }
                profile.updated_at = Set(now);
                profile.update(&self.db).await
            }
            None => {
                let profile = profiles::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    age: Set(input.age),
                    job: Set(input.job),
                    monthly_salary: Set(input.monthly_salary),
                    fixed_costs: Set(input
                        .fixed_costs
                        .unwrap_or_else(|| serde_json::json!({}))),
                    financial_goals: Set(input
                        .financial_goals
                        .unwrap_or_else(|| serde_json::json!([]))),
                    updated_at: Set(now),
                };
                profile.insert(&self.db).await
            }
        }
    }
}
