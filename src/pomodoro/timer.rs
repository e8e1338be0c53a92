//! Countdown state machine
//!
//! The timer itself never reads the clock. Callers drive it with [`tick`] once
//! per second and pass the wall-clock time whenever a session completes.
//!
//! [`tick`]: PomodoroTimer::tick

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::models::{PomodoroSession, PomodoroSettings, SessionType};

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    session_type: SessionType,
    /// Seconds
    time_left: u32,
    is_active: bool,
    completed_pomodoros: u32,
    task: Option<String>,
}

impl PomodoroTimer {
    /// Stopped timer at the start of a work session
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            time_left: settings.work_minutes.saturating_mul(60),
            settings,
            session_type: SessionType::Work,
            is_active: false,
            completed_pomodoros: 0,
            task: None,
        }
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    pub fn task(&self) -> Option<&str> {
        self.task.as_deref()
    }

    pub fn set_task(&mut self, task: Option<String>) {
        self.task = task.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    }

    fn session_seconds(&self) -> u32 {
        self.settings.minutes_for(self.session_type).saturating_mul(60)
    }

    /// Fraction of the current session already elapsed, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        let total = self.session_seconds();
        if total == 0 {
            return 1.0;
        }
        (total - self.time_left.min(total)) as f64 / total as f64
    }

    /// Start or pause; returns whether the timer is now running
    pub fn toggle(&mut self) -> bool {
        self.is_active = !self.is_active;
        self.is_active
    }

    /// Advance one second. Returns the finished session when time runs out.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<PomodoroSession> {
        if !self.is_active {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            Some(self.complete(now))
        } else {
            None
        }
    }

    /// Finish the current session and line up the next one.
    ///
    /// The returned session is backdated by its full length. Work is followed
    /// by a long break every `long_break_interval` pomodoros and by a short
    /// break otherwise; any break is followed by work. The timer stops.
    pub fn complete(&mut self, now: DateTime<Utc>) -> PomodoroSession {
        let duration = self.settings.minutes_for(self.session_type);
        let session = PomodoroSession {
            id: Uuid::new_v4(),
            start_time: now - Duration::minutes(duration as i64),
            end_time: Some(now),
            duration,
            session_type: self.session_type,
            completed: true,
            task: self.task.clone(),
        };

        let next = match self.session_type {
            SessionType::Work => {
                self.completed_pomodoros += 1;
                let interval = self.settings.long_break_interval.max(1);
                if self.completed_pomodoros % interval == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
        };
        self.switch_to(next);

        session
    }

    /// Jump to a session type with a full, stopped countdown
    pub fn switch_to(&mut self, session_type: SessionType) {
        self.session_type = session_type;
        self.time_left = self.session_seconds();
        self.is_active = false;
    }

    /// Restart the current session from its full length
    pub fn reset(&mut self) {
        self.time_left = self.session_seconds();
        self.is_active = false;
    }
}

/// `MM:SS`; minutes are not wrapped at one hour
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_settings() -> PomodoroSettings {
        PomodoroSettings {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 2,
            long_break_interval: 2,
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(100 * 60 + 5), "100:05");
    }

    #[test]
    fn test_oversized_durations_do_not_overflow() {
        let settings = PomodoroSettings {
            work_minutes: 80_000_000,
            ..PomodoroSettings::default()
        };
        let timer = PomodoroTimer::new(settings);
        assert_eq!(timer.time_left(), u32::MAX);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_new_timer_is_stopped_work() {
        let timer = PomodoroTimer::new(PomodoroSettings::default());
        assert_eq!(timer.session_type(), SessionType::Work);
        assert_eq!(timer.time_left(), 1500);
        assert!(!timer.is_active());
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_tick_only_runs_when_active() {
        let mut timer = PomodoroTimer::new(quick_settings());
        let now = Utc::now();

        assert!(timer.tick(now).is_none());
        assert_eq!(timer.time_left(), 60);

        assert!(timer.toggle());
        timer.tick(now);
        assert_eq!(timer.time_left(), 59);
        assert!(!timer.toggle());
    }

    #[test]
    fn test_countdown_completes_session() {
        let mut timer = PomodoroTimer::new(quick_settings());
        timer.set_task(Some("  Read chapter 3 ".to_string()));
        timer.toggle();

        let now = Utc::now();
        let mut finished = None;
        for _ in 0..60 {
            finished = timer.tick(now);
        }

        let session = finished.unwrap();
        assert_eq!(session.session_type, SessionType::Work);
        assert_eq!(session.duration, 1);
        assert_eq!(session.start_time, now - Duration::minutes(1));
        assert_eq!(session.end_time, Some(now));
        assert_eq!(session.task.as_deref(), Some("Read chapter 3"));

        assert_eq!(timer.session_type(), SessionType::ShortBreak);
        assert!(!timer.is_active());
        assert_eq!(timer.time_left(), 60);
    }

    #[test]
    fn test_long_break_every_interval() {
        let mut timer = PomodoroTimer::new(quick_settings());
        let now = Utc::now();

        timer.complete(now);
        assert_eq!(timer.session_type(), SessionType::ShortBreak);
        timer.complete(now);
        assert_eq!(timer.session_type(), SessionType::Work);
        timer.complete(now);
        assert_eq!(timer.session_type(), SessionType::LongBreak);
        assert_eq!(timer.time_left(), 120);
        assert_eq!(timer.completed_pomodoros(), 2);
        timer.complete(now);
        assert_eq!(timer.session_type(), SessionType::Work);
    }

    #[test]
    fn test_switch_and_reset() {
        let mut timer = PomodoroTimer::new(PomodoroSettings::default());
        timer.toggle();
        timer.tick(Utc::now());

        timer.reset();
        assert_eq!(timer.time_left(), 1500);
        assert!(!timer.is_active());

        timer.switch_to(SessionType::LongBreak);
        assert_eq!(timer.time_left(), 900);
        assert_eq!(timer.completed_pomodoros(), 0);
    }
}
