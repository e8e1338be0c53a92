use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use uuid::Uuid;

use studydeck_lib::config::MAX_SESSION_MINUTES;
use studydeck_lib::pomodoro::{format_time, PomodoroSession, PomodoroTimer, SessionType};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn parse_type(session_type: &str) -> Result<SessionType> {
    session_type.parse().map_err(anyhow::Error::msg)
}

/// Count down in the terminal. Ctrl-C abandons the session without logging it.
pub async fn run_start(
    app: &App,
    session_type: &str,
    task: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let session_type = parse_type(session_type)?;
    let mut timer = PomodoroTimer::new(app.config.pomodoro);
    timer.switch_to(session_type);
    timer.set_task(task);
    timer.toggle();

    let interactive = matches!(format, OutputFormat::Plain);
    if interactive {
        let label = match timer.task() {
            Some(task) => format!("{}: {}", session_type.label(), task),
            None => session_type.label().to_string(),
        };
        println!("{} (Ctrl-C to stop)", terminal::bold(&label, use_color));
    }

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    // The first tick fires immediately
    interval.tick().await;

    let session = loop {
        if interactive {
            print!(
                "\r{} {} ",
                format_time(timer.time_left()),
                terminal::progress_bar((timer.progress() * 100.0).round() as u32, 30)
            );
            std::io::stdout().flush()?;
        }

        tokio::select! {
            _ = interval.tick() => {
                if let Some(session) = timer.tick(Utc::now()) {
                    break session;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                if interactive {
                    println!();
                    println!("{}", terminal::paint("Stopped; session not logged.", Color::YELLOW, use_color));
                }
                log::debug!("Pomodoro aborted with {}s left", timer.time_left());
                return Ok(());
            }
        }
    };

    let session = app
        .deck
        .pomodoro
        .record_session(session)
        .context("Failed to log session")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Plain => {
            println!();
            println!(
                "{} {} finished ({} min). Next up: {}",
                terminal::paint("Done!", Color::GREEN, use_color),
                session.session_type.label(),
                session.duration,
                timer.session_type().label()
            );
        }
    }
    Ok(())
}

pub fn run_log(
    app: &App,
    session_type: &str,
    minutes: Option<u32>,
    task: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let session_type = parse_type(session_type)?;
    let minutes = minutes.unwrap_or_else(|| app.config.pomodoro.minutes_for(session_type));
    if minutes == 0 || minutes > MAX_SESSION_MINUTES {
        bail!("Session length must be between 1 and {} minutes", MAX_SESSION_MINUTES);
    }

    let now = Utc::now();
    let session = PomodoroSession {
        id: Uuid::new_v4(),
        start_time: now - Duration::minutes(minutes as i64),
        end_time: Some(now),
        duration: minutes,
        session_type,
        completed: true,
        task: task.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
    };
    let session = app
        .deck
        .pomodoro
        .record_session(session)
        .context("Failed to log session")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Plain => {
            println!("Logged {} of {} min", session.session_type.label(), session.duration)
        }
    }
    Ok(())
}

pub fn run_list(app: &App, limit: usize, format: &OutputFormat) -> Result<()> {
    let sessions = app.deck.pomodoro.list_sessions().context("Failed to list sessions")?;
    let recent: Vec<&PomodoroSession> = sessions.iter().rev().take(limit).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recent)?),
        OutputFormat::Plain => {
            if recent.is_empty() {
                println!("No sessions logged yet.");
                return Ok(());
            }
            println!("{:<16} {:<12} {:>5}  {}", "Started", "Type", "Min", "Task");
            println!(
                "{} {} {}  {}",
                "\u{2500}".repeat(16),
                "\u{2500}".repeat(12),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(20)
            );
            for session in &recent {
                println!(
                    "{:<16} {:<12} {:>5}  {}",
                    terminal::local_datetime(session.start_time),
                    session.session_type.to_string(),
                    session.duration,
                    session.task.as_deref().unwrap_or("")
                );
            }
            println!("\n{} of {} sessions shown", recent.len(), sessions.len());
        }
    }
    Ok(())
}

pub fn run_stats(app: &App, format: &OutputFormat) -> Result<()> {
    let summary = app
        .deck
        .pomodoro
        .today_summary(Utc::now())
        .context("Failed to summarize sessions")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            println!("Pomodoros today: {}", summary.completed_pomodoros);
            println!("Focus time:      {} min", summary.focus_minutes);
            println!("Break time:      {} min", summary.break_minutes);
        }
    }
    Ok(())
}
