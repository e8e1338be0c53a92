use anyhow::{Context, Result};
use chrono::Utc;

use studydeck_lib::goals::Priority;
use studydeck_lib::reminders::{Reminder, ReminderDraft, ReminderType};

use crate::app::{parse_datetime, short_id, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn print_reminder(reminder: &Reminder, use_color: bool) {
    let now = Utc::now();
    let due = terminal::local_datetime(reminder.due_date);
    let due = if reminder.is_completed {
        terminal::paint(&due, Color::GRAY, use_color)
    } else if reminder.due_date < now {
        terminal::paint(&due, Color::RED, use_color)
    } else {
        due
    };
    let check = if reminder.is_completed { "[x]" } else { "[ ]" };
    let kind = format!("{:<8}", reminder.reminder_type.to_string());

    println!(
        "{:<8} {} {} {} {}",
        short_id(reminder.id),
        check,
        due,
        terminal::paint(&kind, terminal::priority_color(reminder.priority), use_color),
        reminder.title
    );
}

pub fn run_add(
    app: &App,
    title: String,
    due: &str,
    reminder_type: &str,
    priority: &str,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let draft = ReminderDraft {
        title,
        description: description.unwrap_or_default(),
        due_date: parse_datetime(due)?,
        priority: priority.parse::<Priority>().map_err(anyhow::Error::msg)?,
        reminder_type: reminder_type.parse::<ReminderType>().map_err(anyhow::Error::msg)?,
    };
    let reminder = app
        .deck
        .reminders
        .add_reminder(draft)
        .context("Failed to add reminder")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminder)?),
        OutputFormat::Plain => {
            println!(
                "Added {} reminder \"{}\" for {}",
                reminder.reminder_type,
                reminder.title,
                terminal::local_datetime(reminder.due_date)
            );
        }
    }
    Ok(())
}

pub fn run_list(app: &App, all: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let reminders = if all {
        let mut reminders = app.deck.reminders.list_reminders()?;
        reminders.sort_by_key(|r| r.due_date);
        reminders
    } else {
        app.deck.reminders.upcoming(Utc::now())?
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminders)?),
        OutputFormat::Plain => {
            if reminders.is_empty() {
                println!("Nothing to remind you of.");
                return Ok(());
            }
            for reminder in &reminders {
                print_reminder(reminder, use_color);
                if !reminder.description.is_empty() {
                    println!("{}", terminal::paint(&format!("         {}", reminder.description), Color::GRAY, use_color));
                }
            }
            println!("\n{} reminders", reminders.len());
        }
    }
    Ok(())
}

pub fn run_done(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let reminder = app.find_reminder(reference)?;
    let reminder = app
        .deck
        .reminders
        .complete_reminder(reminder.id)
        .context("Failed to update reminder")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminder)?),
        OutputFormat::Plain => println!("Done: {}", reminder.title),
    }
    Ok(())
}

pub fn run_delete(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let reminder = app.find_reminder(reference)?;
    app.deck
        .reminders
        .delete_reminder(reminder.id)
        .context("Failed to delete reminder")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": reminder.id.to_string() })),
        OutputFormat::Plain => println!("Deleted reminder \"{}\"", reminder.title),
    }
    Ok(())
}
