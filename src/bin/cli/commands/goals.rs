use anyhow::{Context, Result};
use chrono::Utc;

use studydeck_lib::goals::{GoalDraft, Priority, StudyGoal};

use crate::app::{parse_datetime, short_id, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// How a progress argument changes a goal
#[derive(Debug, PartialEq, Eq)]
enum ProgressChange {
    Set(i32),
    Adjust(i32),
}

fn parse_progress(value: &str) -> Result<ProgressChange> {
    let value = value.trim().trim_end_matches('%');
    let parsed = value
        .parse::<i32>()
        .with_context(|| format!("'{}' is not a number", value))?;

    if value.starts_with('+') || value.starts_with('-') {
        Ok(ProgressChange::Adjust(parsed))
    } else {
        Ok(ProgressChange::Set(parsed))
    }
}

fn print_goal(goal: &StudyGoal, use_color: bool) {
    let now = Utc::now();
    let status = if goal.is_completed {
        terminal::paint("done", Color::GREEN, use_color)
    } else if goal.is_overdue(now) {
        terminal::paint("overdue", Color::RED, use_color)
    } else {
        format!("due {}", terminal::local_date(goal.target_date))
    };
    let priority = format!("{:<6}", goal.priority.to_string());

    println!(
        "{:<8} {} {} {:>3}%  {}  [{}] {}",
        short_id(goal.id),
        terminal::paint(&priority, terminal::priority_color(goal.priority), use_color),
        terminal::progress_bar(goal.progress as u32, 10),
        goal.progress,
        terminal::truncate(&goal.title, 40),
        goal.category,
        status
    );
}

pub fn run_add(
    app: &App,
    title: String,
    description: Option<String>,
    due: Option<&str>,
    priority: &str,
    category: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let priority: Priority = priority.parse().map_err(anyhow::Error::msg)?;
    let target_date = due.map(parse_datetime).transpose()?;

    let draft = GoalDraft {
        title,
        description: description.unwrap_or_default(),
        target_date,
        priority,
        category: category.unwrap_or_default(),
    };
    let goal = app
        .deck
        .goals
        .create_goal(draft, Utc::now())
        .context("Failed to create goal")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&goal)?),
        OutputFormat::Plain => {
            println!("Added goal \"{}\"", goal.title);
            println!("  Due {} ({} priority)", terminal::local_date(goal.target_date), goal.priority);
            println!("  ID: {}", goal.id);
        }
    }
    Ok(())
}

pub fn run_list(app: &App, active: bool, overdue: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let goals = if overdue {
        app.deck.goals.overdue(Utc::now())
    } else if active {
        app.deck.goals.list_active()
    } else {
        app.deck.goals.list_goals()
    }
    .context("Failed to list goals")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&goals)?),
        OutputFormat::Plain => {
            if goals.is_empty() {
                println!("No goals found.");
                return Ok(());
            }
            for goal in &goals {
                print_goal(goal, use_color);
            }
            let done = goals.iter().filter(|g| g.is_completed).count();
            println!("\n{} goals total, {} completed", goals.len(), done);
        }
    }
    Ok(())
}

pub fn run_progress(
    app: &App,
    reference: &str,
    value: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let change = parse_progress(value)?;
    let goal = app.find_goal(reference)?;

    let goal = match change {
        ProgressChange::Set(progress) => app.deck.goals.update_progress(goal.id, progress),
        ProgressChange::Adjust(delta) => app.deck.goals.adjust_progress(goal.id, delta),
    }
    .context("Failed to update goal")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&goal)?),
        OutputFormat::Plain => {
            print_goal(&goal, use_color);
            if goal.is_completed {
                println!("{}", terminal::paint("Goal completed!", Color::GREEN, use_color));
            }
        }
    }
    Ok(())
}

pub fn run_delete(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let goal = app.find_goal(reference)?;
    app.deck.goals.delete_goal(goal.id).context("Failed to delete goal")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": goal.id.to_string() })),
        OutputFormat::Plain => println!("Deleted goal \"{}\"", goal.title),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress() {
        assert_eq!(parse_progress("60").unwrap(), ProgressChange::Set(60));
        assert_eq!(parse_progress("+10").unwrap(), ProgressChange::Adjust(10));
        assert_eq!(parse_progress("-25%").unwrap(), ProgressChange::Adjust(-25));
        assert!(parse_progress("lots").is_err());
    }
}
