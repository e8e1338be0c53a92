use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::parse_tags;
use crate::app::App;
use crate::OutputFormat;

pub async fn run_transcribe(
    app: &App,
    file: &Path,
    title: Option<String>,
    category: Option<String>,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let audio = std::fs::read(file)
        .with_context(|| format!("Failed to read recording {}", file.display()))?;
    if let OutputFormat::Plain = format {
        eprintln!("Transcribing {} ({} bytes)...", file.display(), audio.len());
    }

    let transcription = app
        .generator
        .transcribe_audio(&audio)
        .await
        .context("Transcription failed")?;

    let audio_url = file
        .canonicalize()
        .unwrap_or_else(|_| file.to_path_buf())
        .display()
        .to_string();
    let note = app
        .deck
        .notes
        .save_transcription(
            title.as_deref(),
            &transcription,
            category.as_deref(),
            parse_tags(tags),
            Some(audio_url),
            Utc::now(),
        )
        .context("Failed to save transcription")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
        OutputFormat::Plain => {
            println!("Saved \"{}\" in {}", note.title, note.category);
            println!();
            println!("{}", note.content);
        }
    }
    Ok(())
}
