//! Study goals with a target date and percentage progress

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::GoalsStorage;
