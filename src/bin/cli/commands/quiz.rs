use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Deserialize;

use studydeck_lib::quizzes::{grade, Quiz, QuizDifficulty, QuizDraft, QuizQuestion};

use crate::app::{short_id, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Question as written in an import file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionInput {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    points: Option<u32>,
}

impl From<QuestionInput> for QuizQuestion {
    fn from(input: QuestionInput) -> Self {
        let mut question = QuizQuestion::new(input.question, input.options, input.correct_answer);
        question.explanation = input.explanation.filter(|e| !e.trim().is_empty());
        if let Some(points) = input.points {
            question.points = points;
        }
        question
    }
}

/// Parse "2,1,,4" into zero-based choices; blank entries stay unanswered
fn parse_answers(input: &str) -> Result<Vec<Option<usize>>> {
    input
        .split(',')
        .enumerate()
        .map(|(i, part)| {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            match part.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Some(n - 1)),
                _ => bail!("Answer {} ('{}') must be an option number starting at 1", i + 1, part),
            }
        })
        .collect()
}

fn print_summary(quiz: &Quiz, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(quiz)?),
        OutputFormat::Plain => {
            println!("Created quiz \"{}\" with {} questions", quiz.title, quiz.questions.len());
            println!("  ID: {}", quiz.id);
        }
    }
    Ok(())
}

pub async fn run_generate(app: &App, note: &str, title: Option<&str>, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(note)?;
    if let OutputFormat::Plain = format {
        eprintln!("Generating quiz from \"{}\"...", note.title);
    }

    let quiz = app
        .deck
        .quizzes
        .generate_from_note(&note, title, app.generator.as_ref(), Utc::now())
        .await
        .context("Failed to generate quiz")?;

    print_summary(&quiz, format)
}

#[allow(clippy::too_many_arguments)]
pub fn run_create(
    app: &App,
    title: String,
    from: &Path,
    description: Option<String>,
    time_limit: Option<u32>,
    difficulty: &str,
    subject: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let difficulty: QuizDifficulty = difficulty.parse().map_err(anyhow::Error::msg)?;
    let raw = std::fs::read_to_string(from)
        .with_context(|| format!("Failed to read {}", from.display()))?;
    let inputs: Vec<QuestionInput> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of questions", from.display()))?;

    let draft = QuizDraft {
        title,
        description: description.unwrap_or_default(),
        questions: inputs.into_iter().map(QuizQuestion::from).collect(),
        time_limit,
        difficulty,
        subject: subject.unwrap_or_default(),
    };
    let quiz = app
        .deck
        .quizzes
        .create_quiz(draft, Utc::now())
        .context("Failed to create quiz")?;

    print_summary(&quiz, format)
}

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let quizzes = app.deck.quizzes.list_quizzes().context("Failed to list quizzes")?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = quizzes
                .iter()
                .map(|q| {
                    serde_json::json!({
                        "id": q.id.to_string(),
                        "title": q.title,
                        "subject": q.subject,
                        "difficulty": q.difficulty,
                        "questions": q.questions.len(),
                        "attempts": q.attempts.len(),
                        "bestScore": q.best_score(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if quizzes.is_empty() {
                println!("No quizzes yet.");
                return Ok(());
            }

            let title_width = 36;
            println!(
                "{:<8} {:<t_w$} {:<12} {:>4} {:>8} {:>5}",
                "ID", "Title", "Difficulty", "Qs", "Attempts", "Best",
                t_w = title_width
            );
            println!(
                "{} {} {} {} {} {}",
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(title_width),
                "\u{2500}".repeat(12),
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(5)
            );
            for quiz in &quizzes {
                let best = quiz
                    .best_score()
                    .map(|s| format!("{}%", s))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<8} {:<t_w$} {:<12} {:>4} {:>8} {:>5}",
                    short_id(quiz.id),
                    terminal::truncate(&quiz.title, title_width),
                    quiz.difficulty.to_string(),
                    quiz.questions.len(),
                    quiz.attempts.len(),
                    best,
                    t_w = title_width
                );
            }
            println!("\n{} quizzes total", quizzes.len());
        }
    }
    Ok(())
}

pub fn run_show(
    app: &App,
    reference: &str,
    reveal: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let quiz = app.find_quiz(reference)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }

    println!("{}", terminal::bold(&quiz.title, use_color));
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    let mut meta = format!("{} | {} questions | {} points", quiz.difficulty, quiz.questions.len(), quiz.total_points());
    if !quiz.subject.is_empty() {
        meta = format!("{} | {}", quiz.subject, meta);
    }
    if let Some(limit) = quiz.time_limit {
        meta.push_str(&format!(" | {} min", limit));
    }
    println!("{}", terminal::paint(&meta, Color::GRAY, use_color));

    for (i, question) in quiz.questions.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, question.question);
        for (j, option) in question.options.iter().enumerate() {
            let line = format!("   {}) {}", j + 1, option);
            if reveal && j == question.correct_answer {
                println!("{}", terminal::paint(&line, Color::GREEN, use_color));
            } else {
                println!("{}", line);
            }
        }
        if reveal {
            if let Some(explanation) = &question.explanation {
                println!("{}", terminal::paint(&format!("   {}", explanation), Color::GRAY, use_color));
            }
        }
    }

    if !quiz.attempts.is_empty() {
        println!();
        println!("{}", terminal::bold("Attempts", use_color));
        for attempt in &quiz.attempts {
            let score = format!("{:>3}%", attempt.score);
            println!(
                "  {}  {}  {}s",
                terminal::local_datetime(attempt.end_time),
                terminal::paint(&score, terminal::score_color(attempt.score), use_color),
                attempt.time_spent
            );
        }
        if let (Some(best), Some(average)) = (quiz.best_score(), quiz.average_score()) {
            println!("  Best {}%, average {}%", best, average);
        }
    }

    Ok(())
}

/// Ask each question on stdin until done or out of time
fn ask_interactively(quiz: &Quiz, use_color: bool) -> Result<Vec<Option<usize>>> {
    let start = Utc::now();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = Vec::with_capacity(quiz.questions.len());

    if let Some(deadline) = quiz.deadline(start) {
        println!("You have until {} to finish.", terminal::local_datetime(deadline));
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        println!();
        println!("{}", terminal::bold(&format!("{}/{}. {}", i + 1, quiz.questions.len(), question.question), use_color));
        for (j, option) in question.options.iter().enumerate() {
            println!("   {}) {}", j + 1, option);
        }

        let answer = loop {
            print!("Answer (1-{}, blank to skip): ", question.options.len());
            io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => break None,
            };
            let line = line.trim();
            if line.is_empty() {
                break None;
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => break Some(n - 1),
                _ => println!("Enter a number between 1 and {}", question.options.len()),
            }
        };

        if quiz.is_expired(start, Utc::now()) {
            println!("{}", terminal::paint("Time is up.", Color::RED, use_color));
            break;
        }
        answers.push(answer);
    }

    Ok(answers)
}

pub fn run_take(
    app: &App,
    reference: &str,
    answers: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let quiz = app.find_quiz(reference)?;
    let start = Utc::now();

    let answers = match answers {
        Some(input) => parse_answers(input)?,
        None => {
            println!("{}", terminal::bold(&quiz.title, use_color));
            ask_interactively(&quiz, use_color)?
        }
    };

    let attempt = app
        .deck
        .quizzes
        .record_attempt(quiz.id, answers, start, Utc::now())
        .context("Failed to record attempt")?;
    let result = grade(&quiz, &attempt.answers);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "attempt": attempt,
                "grade": result,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!();
            for (i, question) in quiz.questions.iter().enumerate() {
                let chosen = attempt.answers[i];
                let mark = match chosen {
                    Some(c) if c == question.correct_answer => terminal::paint("correct", Color::GREEN, use_color),
                    Some(_) => terminal::paint("wrong", Color::RED, use_color),
                    None => terminal::paint("skipped", Color::GRAY, use_color),
                };
                println!("{}. {}  {}", i + 1, terminal::truncate(&question.question, 60), mark);
                if chosen != Some(question.correct_answer) {
                    if let Some(option) = question.options.get(question.correct_answer) {
                        println!("   Answer: {}", option);
                    }
                    if let Some(explanation) = &question.explanation {
                        println!("{}", terminal::paint(&format!("   {}", explanation), Color::GRAY, use_color));
                    }
                }
            }
            println!();
            let score = format!("{}%", result.score);
            println!(
                "Score: {} ({}/{} correct, {} points) in {}s",
                terminal::paint(&score, terminal::score_color(result.score), use_color),
                result.correct,
                result.total,
                result.points,
                attempt.time_spent
            );
        }
    }
    Ok(())
}

pub fn run_delete(app: &App, reference: &str, format: &OutputFormat) -> Result<()> {
    let quiz = app.find_quiz(reference)?;
    app.deck.quizzes.delete_quiz(quiz.id).context("Failed to delete quiz")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": quiz.id.to_string() })),
        OutputFormat::Plain => println!("Deleted quiz \"{}\"", quiz.title),
    }
    Ok(())
}
