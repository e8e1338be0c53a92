//! Note data models

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CATEGORY: &str = "General";
pub const AUDIO_CATEGORY: &str = "Audio Notes";

fn default_version() -> u32 {
    1
}

/// A study note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Location of the recording for notes captured from audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub is_archived: bool,
}

/// User-editable fields of a note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Empty means the default category
    pub category: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

/// Ordering for note listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteSort {
    /// Most recently updated first
    #[default]
    Date,
    Title,
    Category,
}

impl FromStr for NoteSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(NoteSort::Date),
            "title" => Ok(NoteSort::Title),
            "category" => Ok(NoteSort::Category),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Search and filter options for note listings
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Case-insensitive match against title, content or any tag
    pub text: Option<String>,
    pub category: Option<String>,
    pub sort: NoteSort,
    pub include_archived: bool,
}

impl NoteQuery {
    pub fn matches(&self, note: &Note) -> bool {
        if note.is_archived && !self.include_archived {
            return false;
        }

        let matches_text = match &self.text {
            Some(text) if !text.is_empty() => {
                let text = text.to_lowercase();
                note.title.to_lowercase().contains(&text)
                    || note.content.to_lowercase().contains(&text)
                    || note.tags.iter().any(|t| t.to_lowercase().contains(&text))
            }
            _ => true,
        };
        let matches_category = self
            .category
            .as_ref()
            .map_or(true, |c| note.category.eq_ignore_ascii_case(c));

        matches_text && matches_category
    }
}
