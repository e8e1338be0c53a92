//! Dated reminders for study tasks, reviews and exams

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::RemindersStorage;
