mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use studydeck_lib::config::Config;

#[derive(Parser)]
#[command(name = "studydeck-cli", about = "Study notes, flashcards and focus tracking", version)]
struct Cli {
    /// Directory holding study data (overrides config and STUDYDECK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Create, browse and edit notes
    #[command(subcommand)]
    Notes(NotesCommand),

    /// Turn recordings into notes
    #[command(subcommand)]
    Audio(AudioCommand),

    /// Flashcards and reviews
    #[command(subcommand)]
    Cards(CardsCommand),

    /// Interactive flashcard session
    #[cfg(feature = "tui")]
    Study {
        /// Include cards that are not due yet
        #[arg(long)]
        all: bool,
        /// Only cards generated from this note
        #[arg(long)]
        note: Option<String>,
    },

    /// Multiple-choice quizzes
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Focus timer and session log
    #[command(subcommand)]
    Pomodoro(PomodoroCommand),

    /// Study goals
    #[command(subcommand)]
    Goals(GoalsCommand),

    /// Dated reminders
    #[command(subcommand)]
    Reminders(RemindersCommand),

    /// Dashboard and study analytics
    Stats {
        /// Window for the analytics section
        #[arg(long, default_value = "week")]
        range: String,
    },

    /// Suggestions for what to study next
    Recommend,
}

#[derive(Subcommand)]
enum NotesCommand {
    /// Create a note
    Add {
        title: String,
        /// Note text (use "-" to read from stdin)
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List notes
    List {
        /// Match title, content or tags
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// date, title or category
        #[arg(long, default_value = "date")]
        sort: String,
        /// Include archived notes
        #[arg(long)]
        archived: bool,
        /// Only starred notes
        #[arg(long)]
        starred: bool,
    },

    /// Show a note
    Show {
        /// Note id or title (prefix match)
        note: String,
    },

    /// Change fields of a note
    Edit {
        note: String,
        #[arg(long)]
        title: Option<String>,
        /// New text (use "-" to read from stdin)
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags, replacing the current ones
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a note
    Delete { note: String },

    /// Star or unstar a note
    Star { note: String },

    /// Archive a note, or restore it with --restore
    Archive {
        note: String,
        #[arg(long)]
        restore: bool,
    },

    /// Generate a summary for a note
    Summarize { note: String },

    /// List categories in use
    Categories,
}

#[derive(Subcommand)]
enum AudioCommand {
    /// Transcribe a recording and save it as a note
    Transcribe {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
}

#[derive(Subcommand)]
enum CardsCommand {
    /// Generate flashcards from a note
    Generate { note: String },

    /// List flashcards
    List {
        #[arg(long)]
        note: Option<String>,
        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },

    /// List cards due for review
    Due,

    /// Record a review result for one card
    #[command(group(ArgGroup::new("result").required(true).args(["correct", "incorrect"])))]
    Review {
        card: String,
        #[arg(long)]
        correct: bool,
        #[arg(long)]
        incorrect: bool,
    },

    /// Delete a card
    Delete { card: String },

    /// Review statistics
    Stats,
}

#[derive(Subcommand)]
enum QuizCommand {
    /// Generate a quiz from a note
    Generate {
        note: String,
        #[arg(long)]
        title: Option<String>,
    },

    /// Create a quiz from a JSON file of questions
    Create {
        title: String,
        /// JSON array of {question, options, correctAnswer, explanation?, points?}
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        description: Option<String>,
        /// Minutes allowed per attempt
        #[arg(long)]
        time_limit: Option<u32>,
        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        difficulty: String,
        #[arg(long)]
        subject: Option<String>,
    },

    /// List quizzes
    List,

    /// Show a quiz and its attempts
    Show {
        quiz: String,
        /// Reveal correct answers
        #[arg(long)]
        answers: bool,
    },

    /// Take a quiz
    Take {
        quiz: String,
        /// Answers as 1-based option numbers, e.g. "2,1,,4" (blank skips)
        #[arg(long)]
        answers: Option<String>,
    },

    /// Delete a quiz
    Delete { quiz: String },
}

#[derive(Subcommand)]
enum PomodoroCommand {
    /// Run a countdown and log it when it finishes
    Start {
        /// work, short-break or long-break
        #[arg(long = "type", default_value = "work")]
        session_type: String,
        #[arg(long)]
        task: Option<String>,
    },

    /// Log a session that ended just now
    Log {
        #[arg(long = "type", default_value = "work")]
        session_type: String,
        /// Length in minutes (defaults to the configured length)
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        task: Option<String>,
    },

    /// List logged sessions
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Today's totals
    Stats,
}

#[derive(Subcommand)]
enum GoalsCommand {
    /// Add a goal
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Target date (YYYY-MM-DD); a week from now by default
        #[arg(long)]
        due: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        category: Option<String>,
    },

    /// List goals
    List {
        /// Only goals that are not completed
        #[arg(long)]
        active: bool,
        /// Only overdue goals
        #[arg(long)]
        overdue: bool,
    },

    /// Set progress ("60") or move it ("+10", "-10")
    Progress {
        goal: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Delete a goal
    Delete { goal: String },
}

#[derive(Subcommand)]
enum RemindersCommand {
    /// Add a reminder
    Add {
        title: String,
        /// Due date (YYYY-MM-DD or "YYYY-MM-DD HH:MM")
        #[arg(long)]
        due: String,
        /// study, review, deadline or exam
        #[arg(long = "type", default_value = "study")]
        reminder_type: String,
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// List pending reminders
    List {
        /// Include completed reminders
        #[arg(long)]
        all: bool,
    },

    /// Mark a reminder as done
    Done { reminder: String },

    /// Delete a reminder
    Delete { reminder: String },
}

/// Read content from stdin if piped, or resolve "-" as stdin
fn resolve_content(content: Option<String>) -> Option<String> {
    match content.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            Some(buf)
        }
        Some(_) => content,
        None => {
            if !std::io::stdin().is_terminal() {
                let mut buf = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
                if buf.is_empty() { None } else { Some(buf) }
            } else {
                None
            }
        }
    }
}

/// Log filter: RUST_LOG wins, then -v flags, then config/STUDYDECK_LOG
fn init_logging(verbose: u8, config: &Config) {
    let default_level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    init_logging(cli.verbose, &config);

    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(config)?;
    let format = &cli.format;

    match cli.command {
        Command::Notes(cmd) => match cmd {
            NotesCommand::Add { title, content, category, tags } => {
                let content = resolve_content(content);
                commands::notes::run_add(&app, &title, content, category, tags.as_deref(), format)?;
            }
            NotesCommand::List { search, category, sort, archived, starred } => {
                commands::notes::run_list(&app, search, category, &sort, archived, starred, format, use_color)?;
            }
            NotesCommand::Show { note } => {
                commands::notes::run_show(&app, &note, format, use_color)?;
            }
            NotesCommand::Edit { note, title, content, category, tags } => {
                let content = content.and_then(|c| resolve_content(Some(c)));
                commands::notes::run_edit(&app, &note, title, content, category, tags.as_deref(), format)?;
            }
            NotesCommand::Delete { note } => commands::notes::run_delete(&app, &note, format)?,
            NotesCommand::Star { note } => commands::notes::run_star(&app, &note, format)?,
            NotesCommand::Archive { note, restore } => {
                commands::notes::run_archive(&app, &note, !restore, format)?;
            }
            NotesCommand::Summarize { note } => {
                commands::notes::run_summarize(&app, &note, format).await?;
            }
            NotesCommand::Categories => commands::notes::run_categories(&app, format)?,
        },
        Command::Audio(AudioCommand::Transcribe { file, title, category, tags }) => {
            commands::audio::run_transcribe(&app, &file, title, category, tags.as_deref(), format).await?;
        }
        Command::Cards(cmd) => match cmd {
            CardsCommand::Generate { note } => commands::cards::run_generate(&app, &note, format).await?,
            CardsCommand::List { note, difficulty, search } => {
                commands::cards::run_list(&app, note.as_deref(), difficulty.as_deref(), search, format, use_color)?;
            }
            CardsCommand::Due => commands::cards::run_due(&app, format, use_color)?,
            CardsCommand::Review { card, correct, incorrect: _ } => {
                commands::cards::run_review(&app, &card, correct, format, use_color)?;
            }
            CardsCommand::Delete { card } => commands::cards::run_delete(&app, &card, format)?,
            CardsCommand::Stats => commands::cards::run_stats(&app, format)?,
        },
        #[cfg(feature = "tui")]
        Command::Study { all, note } => {
            tui::run(app, all, note.as_deref())?;
        }
        Command::Quiz(cmd) => match cmd {
            QuizCommand::Generate { note, title } => {
                commands::quiz::run_generate(&app, &note, title.as_deref(), format).await?;
            }
            QuizCommand::Create { title, from, description, time_limit, difficulty, subject } => {
                commands::quiz::run_create(&app, title, &from, description, time_limit, &difficulty, subject, format)?;
            }
            QuizCommand::List => commands::quiz::run_list(&app, format)?,
            QuizCommand::Show { quiz, answers } => {
                commands::quiz::run_show(&app, &quiz, answers, format, use_color)?;
            }
            QuizCommand::Take { quiz, answers } => {
                commands::quiz::run_take(&app, &quiz, answers.as_deref(), format, use_color)?;
            }
            QuizCommand::Delete { quiz } => commands::quiz::run_delete(&app, &quiz, format)?,
        },
        Command::Pomodoro(cmd) => match cmd {
            PomodoroCommand::Start { session_type, task } => {
                commands::pomodoro::run_start(&app, &session_type, task, format, use_color).await?;
            }
            PomodoroCommand::Log { session_type, minutes, task } => {
                commands::pomodoro::run_log(&app, &session_type, minutes, task, format)?;
            }
            PomodoroCommand::List { limit } => commands::pomodoro::run_list(&app, limit, format)?,
            PomodoroCommand::Stats => commands::pomodoro::run_stats(&app, format)?,
        },
        Command::Goals(cmd) => match cmd {
            GoalsCommand::Add { title, description, due, priority, category } => {
                commands::goals::run_add(&app, title, description, due.as_deref(), &priority, category, format)?;
            }
            GoalsCommand::List { active, overdue } => {
                commands::goals::run_list(&app, active, overdue, format, use_color)?;
            }
            GoalsCommand::Progress { goal, value } => {
                commands::goals::run_progress(&app, &goal, &value, format, use_color)?;
            }
            GoalsCommand::Delete { goal } => commands::goals::run_delete(&app, &goal, format)?,
        },
        Command::Reminders(cmd) => match cmd {
            RemindersCommand::Add { title, due, reminder_type, priority, description } => {
                commands::reminders::run_add(&app, title, &due, &reminder_type, &priority, description, format)?;
            }
            RemindersCommand::List { all } => commands::reminders::run_list(&app, all, format, use_color)?,
            RemindersCommand::Done { reminder } => commands::reminders::run_done(&app, &reminder, format)?,
            RemindersCommand::Delete { reminder } => {
                commands::reminders::run_delete(&app, &reminder, format)?;
            }
        },
        Command::Stats { range } => commands::stats::run(&app, &range, format, use_color)?,
        Command::Recommend => commands::recommend::run(&app, format).await?,
    }

    Ok(())
}
