pub mod audio;
pub mod cards;
pub mod goals;
pub mod notes;
pub mod pomodoro;
pub mod quiz;
pub mod recommend;
pub mod reminders;
pub mod stats;
