//! Day-based study streaks

use chrono::{DateTime, Utc};

use super::models::StudyStreak;

impl StudyStreak {
    /// Count a study day at `at`.
    ///
    /// The next calendar day extends the streak, a later day restarts it, and
    /// the same day or an earlier one is ignored. Returns whether the day was
    /// counted.
    pub fn record_study_day(&mut self, at: DateTime<Utc>) -> bool {
        if self.total_days > 0 {
            let gap = (at.date_naive() - self.last_study_date.date_naive()).num_days();
            if gap <= 0 {
                return false;
            }
            if gap == 1 {
                self.current_streak += 1;
            } else {
                self.current_streak = 1;
            }
        } else {
            self.current_streak = 1;
        }

        self.total_days += 1;
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_study_date = at;
        true
    }

    /// Streak as seen at `now`: zero once a whole day has passed without study
    pub fn active_streak(&self, now: DateTime<Utc>) -> u32 {
        if self.total_days == 0 {
            return 0;
        }
        let gap = (now.date_naive() - self.last_study_date.date_naive()).num_days();
        if gap > 1 {
            0
        } else {
            self.current_streak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 18, 0, 0).unwrap()
    }

    fn fresh() -> StudyStreak {
        StudyStreak {
            last_study_date: day(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_day_starts_streak() {
        let mut streak = fresh();
        assert!(streak.record_study_day(day(1)));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.total_days, 1);
    }

    #[test]
    fn test_consecutive_days_extend() {
        let mut streak = fresh();
        for d in 1..=4 {
            streak.record_study_day(day(d));
        }
        assert_eq!(streak.current_streak, 4);
        assert_eq!(streak.longest_streak, 4);
        assert_eq!(streak.total_days, 4);
    }

    #[test]
    fn test_same_day_is_ignored() {
        let mut streak = fresh();
        streak.record_study_day(day(5));
        assert!(!streak.record_study_day(day(5) + Duration::hours(2)));
        assert!(!streak.record_study_day(day(4)));
        assert_eq!(streak.total_days, 1);
        assert_eq!(streak.current_streak, 1);
    }

    #[test]
    fn test_gap_restarts_but_keeps_longest() {
        let mut streak = fresh();
        streak.record_study_day(day(1));
        streak.record_study_day(day(2));
        streak.record_study_day(day(3));
        streak.record_study_day(day(6));

        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.total_days, 4);
    }

    #[test]
    fn test_active_streak_lapses() {
        let mut streak = fresh();
        streak.record_study_day(day(1));
        streak.record_study_day(day(2));

        assert_eq!(streak.active_streak(day(2)), 2);
        assert_eq!(streak.active_streak(day(3)), 2);
        assert_eq!(streak.active_streak(day(4)), 0);
        assert_eq!(fresh().active_streak(day(1)), 0);
    }
}
