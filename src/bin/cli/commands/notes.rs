use anyhow::{Context, Result};
use chrono::Utc;

use studydeck_lib::notes::{Note, NoteDraft, NoteQuery, NoteSort};

use crate::app::{parse_tags, short_id, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn note_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id.to_string(),
        "title": note.title,
        "category": note.category,
        "tags": note.tags,
        "isStarred": note.is_starred,
        "isArchived": note.is_archived,
        "version": note.version,
        "updatedAt": note.updated_at.to_rfc3339(),
        "createdAt": note.created_at.to_rfc3339(),
    })
}

fn print_saved(verb: &str, note: &Note, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(note)?),
        OutputFormat::Plain => {
            println!("{} note \"{}\"", verb, note.title);
            println!("  Category: {}", note.category);
            if !note.tags.is_empty() {
                println!("  Tags: {}", terminal::hashtags(&note.tags));
            }
            println!("  ID: {}", note.id);
        }
    }
    Ok(())
}

pub fn run_add(
    app: &App,
    title: &str,
    content: Option<String>,
    category: Option<String>,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let draft = NoteDraft {
        title: title.to_string(),
        content: content.unwrap_or_default(),
        category: category.unwrap_or_default(),
        tags: parse_tags(tags),
        summary: None,
    };
    let note = app
        .deck
        .notes
        .create_note(draft, Utc::now())
        .context("Failed to create note")?;

    print_saved("Created", &note, format)
}

#[allow(clippy::too_many_arguments)]
pub fn run_list(
    app: &App,
    search: Option<String>,
    category: Option<String>,
    sort: &str,
    archived: bool,
    starred: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let sort: NoteSort = sort.parse().map_err(anyhow::Error::msg)?;
    let query = NoteQuery {
        text: search,
        category,
        sort,
        include_archived: archived,
    };
    let mut notes = app.deck.notes.search(&query).context("Failed to list notes")?;
    if starred {
        notes.retain(|n| n.is_starred);
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = notes.iter().map(note_json).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            let title_width = notes
                .iter()
                .map(|n| n.title.chars().count() + 2)
                .max()
                .unwrap_or(5)
                .clamp(5, 40);
            let category_width = 15;

            println!(
                "{:<8} {:<title_w$} {:<cat_w$} {}",
                "ID", "Title", "Category", "Updated",
                title_w = title_width, cat_w = category_width
            );
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(title_width),
                "\u{2500}".repeat(category_width),
                "\u{2500}".repeat(10)
            );

            for note in &notes {
                let star = if note.is_starred { "* " } else { "  " };
                let title = terminal::truncate(&format!("{}{}", star, note.title), title_width);
                let archived = if note.is_archived {
                    terminal::paint(" [archived]", Color::GRAY, use_color)
                } else {
                    String::new()
                };
                println!(
                    "{:<8} {:<title_w$} {:<cat_w$} {}{}",
                    short_id(note.id),
                    title,
                    terminal::truncate(&note.category, category_width),
                    terminal::local_date(note.updated_at),
                    archived,
                    title_w = title_width, cat_w = category_width
                );
            }

            println!("\n{} notes total", notes.len());
        }
    }

    Ok(())
}

pub fn run_show(app: &App, reference: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let note = app.find_note(reference)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&note)?);
        return Ok(());
    }

    let star = if note.is_starred { " *" } else { "" };
    println!("{}{}", terminal::bold(&note.title, use_color), star);

    let meta = format!(
        "{} | v{} | updated {}",
        note.category,
        note.version,
        terminal::local_datetime(note.updated_at)
    );
    println!("{}", terminal::paint(&meta, Color::GRAY, use_color));
    if !note.tags.is_empty() {
        println!("{}", terminal::paint(&terminal::hashtags(&note.tags), Color::CYAN, use_color));
    }
    if let Some(url) = &note.audio_url {
        println!("{}", terminal::paint(&format!("Audio: {}", url), Color::GRAY, use_color));
    }

    if let Some(summary) = &note.summary {
        println!();
        println!("{}", terminal::paint("Summary", Color::BOLD, use_color));
        for line in terminal::wrap_lines(summary, "  ", 80) {
            println!("{}", line);
        }
    }

    println!();
    for line in terminal::wrap_lines(&note.content, "", 80) {
        println!("{}", line);
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    reference: &str,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let note = app.find_note(reference)?;

    let draft = NoteDraft {
        title: title.unwrap_or(note.title),
        content: content.unwrap_or(note.content),
        category: category.unwrap_or(note.category),
        tags: match tags {
            Some(_) => parse_tags(tags),
            None => note.tags,
        },
        summary: note.summary,
    };
    let updated = app
        .deck
        .notes
        .update_note(note.id, draft, Utc::now())
        .context("Failed to update note")?;

    print_saved("Updated", &updated, format)
}

pub fn run_delete(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(reference)?;
    app.deck.notes.delete_note(note.id).context("Failed to delete note")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": note.id.to_string() }));
        }
        OutputFormat::Plain => println!("Deleted note \"{}\"", note.title),
    }
    Ok(())
}

pub fn run_star(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(reference)?;
    let note = app.deck.notes.toggle_star(note.id).context("Failed to update note")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note_json(&note))?),
        OutputFormat::Plain => {
            let verb = if note.is_starred { "Starred" } else { "Unstarred" };
            println!("{} \"{}\"", verb, note.title);
        }
    }
    Ok(())
}

pub fn run_archive(app: &App, reference: &str, archive: bool, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(reference)?;
    let note = app
        .deck
        .notes
        .set_archived(note.id, archive)
        .context("Failed to update note")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note_json(&note))?),
        OutputFormat::Plain => {
            let verb = if archive { "Archived" } else { "Restored" };
            println!("{} \"{}\"", verb, note.title);
        }
    }
    Ok(())
}

pub async fn run_summarize(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(reference)?;
    if let OutputFormat::Plain = format {
        eprintln!("Summarizing \"{}\"...", note.title);
    }

    let note = app
        .deck
        .notes
        .summarize_note(note.id, app.generator.as_ref())
        .await
        .context("Failed to summarize note")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": note.id.to_string(),
                "summary": note.summary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if let Some(summary) = &note.summary {
                println!("{}", summary);
            }
        }
    }
    Ok(())
}

pub fn run_categories(app: &App, format: &OutputFormat) -> Result<()> {
    let notes = app.deck.notes.list_notes().context("Failed to list notes")?;
    let categories = app.deck.notes.categories().context("Failed to list categories")?;

    let counted: Vec<(String, usize)> = categories
        .into_iter()
        .map(|c| {
            let count = notes.iter().filter(|n| n.category == c).count();
            (c, count)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = counted
                .iter()
                .map(|(name, count)| serde_json::json!({ "category": name, "notes": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if counted.is_empty() {
                println!("No notes yet.");
            }
            for (name, count) in &counted {
                println!("{:<24} {}", name, count);
            }
        }
    }
    Ok(())
}
