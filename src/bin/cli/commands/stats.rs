use anyhow::{Context, Result};
use chrono::Utc;

use studydeck_lib::analytics::{AnalyticsReport, DashboardSummary, TimeRange};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

const CHART_WIDTH: usize = 30;

fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

pub fn run(app: &App, range: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let range: TimeRange = range.parse().map_err(anyhow::Error::msg)?;
    let now = Utc::now();
    let deck = &app.deck;

    let notes = deck.notes.list_notes().context("Failed to load notes")?;
    let sessions = deck.analytics.list_sessions().context("Failed to load sessions")?;
    let goals = deck.goals.list_goals().context("Failed to load goals")?;
    let streak = deck.analytics.streak().context("Failed to load streak")?;
    let cards = deck.flashcards.stats(now).context("Failed to load flashcards")?;
    let focus = deck.pomodoro.today_summary(now).context("Failed to load pomodoro log")?;

    let current_streak = streak.active_streak(now);
    let dashboard = DashboardSummary::build(now, &notes, &sessions, &goals, current_streak);
    let report = AnalyticsReport::build(range, now, &sessions, &notes);

    if let OutputFormat::Json = format {
        let output = serde_json::json!({
            "dashboard": dashboard,
            "report": report,
            "streak": streak,
            "flashcards": cards,
            "pomodoro": focus,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", terminal::bold("Today", use_color));
    println!("  Notes:          {}", dashboard.notes_created);
    println!("  Study time:     {} min", dashboard.study_minutes_today);
    println!("  Pomodoros:      {} ({} min focus)", focus.completed_pomodoros, focus.focus_minutes);
    println!("  Active goals:   {}", dashboard.active_goals);
    println!("  Cards due:      {}", cards.due);
    let weekly = format!("{}%", dashboard.weekly_accuracy);
    println!(
        "  Week accuracy:  {}",
        terminal::paint(&weekly, terminal::score_color(dashboard.weekly_accuracy), use_color)
    );
    println!(
        "  Streak:         {} days (longest {}, {} days total)",
        current_streak, streak.longest_streak, streak.total_days
    );

    println!();
    println!("{}", terminal::bold(&format!("Last {}", range), use_color));
    println!("  Sessions:       {}", report.session_count);
    println!("  Total time:     {} min", report.total_study_time);
    println!("  Avg session:    {} min", report.average_session_length);
    println!("  Avg accuracy:   {}%", report.average_accuracy);
    println!("  Peak hour:      {}", hour_label(report.most_productive_hour));

    println!();
    println!("{}", terminal::bold("Past 7 days", use_color));
    let max = report.daily.iter().map(|d| d.minutes).max().unwrap_or(0).max(1);
    let best = report.most_productive_day().filter(|d| d.minutes > 0).map(|d| d.date);
    for day in &report.daily {
        let width = (day.minutes as usize * CHART_WIDTH) / max as usize;
        let bar = "\u{2588}".repeat(width);
        let bar = if Some(day.date) == best {
            terminal::paint(&bar, Color::GREEN, use_color)
        } else {
            terminal::paint(&bar, Color::BLUE, use_color)
        };
        println!("  {} {} {}", day.day, bar, day.minutes);
    }

    if !report.subjects.is_empty() {
        println!();
        println!("{}", terminal::bold("Subjects", use_color));
        for subject in &report.subjects {
            println!(
                "  {:<20} {:>3} notes {:>4}%",
                terminal::truncate(&subject.subject, 20),
                subject.notes,
                subject.percentage
            );
        }
    }

    if !dashboard.recent_notes.is_empty() {
        println!();
        println!("{}", terminal::bold("Recent notes", use_color));
        for note in &dashboard.recent_notes {
            println!(
                "  {}  {}",
                terminal::paint(&terminal::local_date(note.updated_at), Color::GRAY, use_color),
                note.title
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(9), "9 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(14), "2 PM");
    }
}
