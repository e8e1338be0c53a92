use anyhow::{Context, Result};
use chrono::Utc;

use studydeck_lib::flashcards::{Difficulty, Flashcard, FlashcardFilter};

use crate::app::{short_id, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn print_cards(cards: &[Flashcard], use_color: bool) {
    let question_width = 50;

    println!("{:<8} {:<8} {:<q_w$} {}", "ID", "Level", "Question", "Next review", q_w = question_width);
    println!(
        "{} {} {} {}",
        "\u{2500}".repeat(8),
        "\u{2500}".repeat(8),
        "\u{2500}".repeat(question_width),
        "\u{2500}".repeat(11)
    );

    for card in cards {
        let level = format!("{:<8}", card.difficulty.as_str());
        println!(
            "{:<8} {} {:<q_w$} {}",
            short_id(card.id),
            terminal::paint(&level, terminal::difficulty_color(card.difficulty), use_color),
            terminal::truncate(&card.question, question_width),
            terminal::local_date(card.next_review),
            q_w = question_width
        );
    }
}

pub async fn run_generate(app: &App, note: &str, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(note)?;
    if let OutputFormat::Plain = format {
        eprintln!("Generating flashcards from \"{}\"...", note.title);
    }

    let cards = app
        .deck
        .flashcards
        .generate_for_note(&note, app.generator.as_ref(), Utc::now())
        .await
        .context("Failed to generate flashcards")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Plain => {
            println!("Created {} cards from \"{}\"", cards.len(), note.title);
            for card in &cards {
                println!("  {}  {}", short_id(card.id), card.question);
            }
        }
    }
    Ok(())
}

pub fn run_list(
    app: &App,
    note: Option<&str>,
    difficulty: Option<&str>,
    search: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let note_id = match note {
        Some(reference) => Some(app.find_note(reference)?.id),
        None => None,
    };
    let difficulty = difficulty
        .map(|d| d.parse::<Difficulty>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let filter = FlashcardFilter {
        search,
        note_id,
        difficulty,
    };
    let cards = app.deck.flashcards.filter(&filter).context("Failed to list flashcards")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No flashcards found.");
                return Ok(());
            }
            print_cards(&cards, use_color);
            println!("\n{} cards total", cards.len());
        }
    }
    Ok(())
}

pub fn run_due(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app
        .deck
        .flashcards
        .due_cards(Utc::now())
        .context("Failed to load flashcards")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("Nothing due. Come back later.");
                return Ok(());
            }
            print_cards(&cards, use_color);
            println!("\n{} cards due", cards.len());
        }
    }
    Ok(())
}

pub fn run_review(
    app: &App,
    reference: &str,
    correct: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let card = app.find_card(reference)?;
    let card = app
        .deck
        .flashcards
        .submit_review(card.id, correct, Utc::now())
        .context("Failed to record review")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            let (mark, color) = if correct {
                ("correct", Color::GREEN)
            } else {
                ("incorrect", Color::RED)
            };
            println!("{}: {}", terminal::paint(mark, color, use_color), card.question);
            println!(
                "  Now {}, next review {}",
                terminal::paint(card.difficulty.as_str(), terminal::difficulty_color(card.difficulty), use_color),
                terminal::local_datetime(card.next_review)
            );
        }
    }
    Ok(())
}

pub fn run_delete(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(reference)?;
    app.deck.flashcards.delete_card(card.id).context("Failed to delete flashcard")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": card.id.to_string() })),
        OutputFormat::Plain => println!("Deleted card \"{}\"", terminal::truncate(&card.question, 60)),
    }
    Ok(())
}

pub fn run_stats(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app
        .deck
        .flashcards
        .stats(Utc::now())
        .context("Failed to compute flashcard stats")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            println!("Cards:     {}", stats.total);
            println!("Due now:   {}", stats.due);
            println!("Easy:      {}", stats.easy);
            println!("Medium:    {}", stats.medium);
            println!("Hard:      {}", stats.hard);
            println!("Accuracy:  {}%", stats.average_accuracy);
        }
    }
    Ok(())
}
