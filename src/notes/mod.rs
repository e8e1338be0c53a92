//! Notes: the study material everything else is derived from

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::NotesStorage;
