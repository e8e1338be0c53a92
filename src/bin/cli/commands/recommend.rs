use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let notes = app.deck.notes.list_notes().context("Failed to load notes")?;
    let sessions = app.deck.analytics.list_sessions().context("Failed to load sessions")?;

    let recommendations = app
        .generator
        .study_recommendations(&notes, &sessions)
        .await
        .context("Failed to get recommendations")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendations)?),
        OutputFormat::Plain => {
            for (i, recommendation) in recommendations.iter().enumerate() {
                println!("{}. {}", i + 1, recommendation);
            }
        }
    }
    Ok(())
}
