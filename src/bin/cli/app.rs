use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

use studydeck_lib::ai::{ContentGenerator, MockContentGenerator};
use studydeck_lib::config::Config;
use studydeck_lib::flashcards::Flashcard;
use studydeck_lib::goals::StudyGoal;
use studydeck_lib::notes::Note;
use studydeck_lib::quizzes::Quiz;
use studydeck_lib::reminders::Reminder;
use studydeck_lib::StudyDeck;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub deck: StudyDeck,
    pub generator: Box<dyn ContentGenerator>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        let deck = StudyDeck::open(data_dir.clone())
            .with_context(|| format!("Failed to open study data in {}", data_dir.display()))?;
        let generator = Box::new(MockContentGenerator::new(config.ai.latency()));

        Ok(Self {
            config,
            deck,
            generator,
        })
    }

    /// Find a note by id prefix or title (case-insensitive prefix match)
    pub fn find_note(&self, reference: &str) -> Result<Note> {
        let notes = self.deck.notes.list_notes().context("Failed to list notes")?;
        resolve("note", notes, reference, |n| n.id, |n| &n.title)
    }

    /// Find a card by id prefix or question text
    pub fn find_card(&self, reference: &str) -> Result<Flashcard> {
        let cards = self.deck.flashcards.list_cards().context("Failed to list flashcards")?;
        resolve("flashcard", cards, reference, |c| c.id, |c| &c.question)
    }

    pub fn find_quiz(&self, reference: &str) -> Result<Quiz> {
        let quizzes = self.deck.quizzes.list_quizzes().context("Failed to list quizzes")?;
        resolve("quiz", quizzes, reference, |q| q.id, |q| &q.title)
    }

    pub fn find_goal(&self, reference: &str) -> Result<StudyGoal> {
        let goals = self.deck.goals.list_goals().context("Failed to list goals")?;
        resolve("goal", goals, reference, |g| g.id, |g| &g.title)
    }

    pub fn find_reminder(&self, reference: &str) -> Result<Reminder> {
        let reminders = self
            .deck
            .reminders
            .list_reminders()
            .context("Failed to list reminders")?;
        resolve("reminder", reminders, reference, |r| r.id, |r| &r.title)
    }
}

/// Pick one item by full id, exact label, id prefix or label prefix, in
/// that order. Several matches at the deciding step is an error.
fn resolve<T, I, L>(kind: &str, items: Vec<T>, reference: &str, id: I, label: L) -> Result<T>
where
    I: Fn(&T) -> Uuid,
    L: Fn(&T) -> &str,
{
    let reference = reference.trim();
    let lower = reference.to_lowercase();

    if let Ok(uuid) = Uuid::parse_str(reference) {
        if let Some(pos) = items.iter().position(|item| id(item) == uuid) {
            return Ok(take(items, pos));
        }
    }

    if let Some(pos) = items.iter().position(|item| label(item).to_lowercase() == lower) {
        return Ok(take(items, pos));
    }

    let by_id: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| lower.len() >= 4 && id(item).to_string().starts_with(&lower))
        .map(|(i, _)| i)
        .collect();
    let matches = if by_id.is_empty() {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| label(item).to_lowercase().starts_with(&lower))
            .map(|(i, _)| i)
            .collect()
    } else {
        by_id
    };

    let describe = |item: &T| format!("  - {} ({})", label(item), short_id(id(item)));
    match matches.len() {
        0 => {
            if items.is_empty() {
                bail!("No {} matching '{}' (there are none yet)", kind, reference);
            }
            bail!(
                "No {} matching '{}'. Available:\n{}",
                kind,
                reference,
                items.iter().take(10).map(describe).collect::<Vec<_>>().join("\n")
            )
        }
        1 => Ok(take(items, matches[0])),
        _ => bail!(
            "Ambiguous {} '{}'. Matches:\n{}",
            kind,
            reference,
            matches.iter().map(|i| describe(&items[*i])).collect::<Vec<_>>().join("\n")
        ),
    }
}

fn take<T>(mut items: Vec<T>, pos: usize) -> T {
    items.swap_remove(pos)
}

/// First eight hex digits of an id
pub fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Split a comma-separated tag list
pub fn parse_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|s| {
        s.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Parse a local date ("2024-05-01") or date and time ("2024-05-01 14:30"),
/// or an RFC 3339 timestamp
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        dt
    } else if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        match date.and_hms_opt(0, 0, 0) {
            Some(dt) => dt,
            None => bail!("Invalid date '{}'", input),
        }
    } else {
        bail!("Invalid date '{}'. Use YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"", input);
    };

    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => Ok(local.with_timezone(&Utc)),
        None => bail!("'{}' does not exist in the local time zone", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Uuid,
        name: String,
    }

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .map(|n| Item {
                id: Uuid::new_v4(),
                name: n.to_string(),
            })
            .collect()
    }

    fn find(list: &[Item], reference: &str) -> Result<Item> {
        resolve("item", list.to_vec(), reference, |i| i.id, |i| &i.name)
    }

    #[test]
    fn test_resolve_by_title() {
        let list = items(&["Biology", "Biochemistry", "Physics"]);

        assert_eq!(find(&list, "phys").unwrap().name, "Physics");
        assert_eq!(find(&list, "BIOLOGY").unwrap().name, "Biology");
        assert!(find(&list, "bio").is_err());
        assert!(find(&list, "math").is_err());
    }

    #[test]
    fn test_resolve_by_id() {
        let list = items(&["One", "Two"]);
        let target = list[1].clone();

        assert_eq!(find(&list, &target.id.to_string()).unwrap(), target);
        assert_eq!(find(&list, &short_id(target.id)).unwrap(), target);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(Some(" a, b,,c ")), vec!["a", "b", "c"]);
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn test_parse_datetime() {
        assert!(parse_datetime("2024-05-01").is_ok());
        assert!(parse_datetime("2024-05-01 14:30").is_ok());
        assert_eq!(
            parse_datetime("2024-05-01T10:00:00Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert!(parse_datetime("tomorrow").is_err());
    }
}
