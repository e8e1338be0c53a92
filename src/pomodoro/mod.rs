//! Pomodoro focus timer and its session log

pub mod models;
pub mod storage;
pub mod timer;

pub use models::*;
pub use storage::PomodoroStorage;
pub use timer::{format_time, PomodoroTimer};
