//! Multiple-choice quizzes and their attempts

pub mod grading;
pub mod models;
pub mod storage;

pub use grading::{grade, Grade};
pub use models::*;
pub use storage::QuizStorage;
