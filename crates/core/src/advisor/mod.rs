//! Prompt building for the text-generation advisor.

pub mod prompt;
pub mod types;

pub use prompt::build_prompt;
pub use types::{AdvisorProfile, ExpenseItem, TaskStatus};
