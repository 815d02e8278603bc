//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod advisor;
pub mod check_in;
pub mod plan;
pub mod profile;
pub mod reward;
pub mod transaction;
pub mod user;

pub use advisor::{AdvisorRepository, RecordExchangeInput, TaskWithLatestExchange};
pub use check_in::{CheckInError, CheckInRepository};
pub use plan::{PlanError, PlanRepository, PlanWithNodes, UpdateNodeInput};
pub use profile::{ProfileRepository, UpdateProfileInput};
pub use reward::{RewardError, RewardRepository};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionRepository, TransactionSummary,
};
pub use user::UserRepository;
