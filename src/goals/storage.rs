//! Goals storage implementation

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::models::*;
use crate::storage::{Result, StorageError, StorageKey, StudyStore};

const DEFAULT_GOAL_CATEGORY: &str = "General";

/// Storage for study goals
#[derive(Clone)]
pub struct GoalsStorage {
    store: StudyStore,
}

impl GoalsStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    /// List all goals, newest first
    pub fn list_goals(&self) -> Result<Vec<StudyGoal>> {
        self.store.load_collection(StorageKey::Goals)
    }

    /// Goals that are not completed yet
    pub fn list_active(&self) -> Result<Vec<StudyGoal>> {
        let goals = self.list_goals()?;
        Ok(goals.into_iter().filter(|g| !g.is_completed).collect())
    }

    /// Active goals whose target date has passed
    pub fn overdue(&self, now: DateTime<Utc>) -> Result<Vec<StudyGoal>> {
        let goals = self.list_goals()?;
        Ok(goals.into_iter().filter(|g| g.is_overdue(now)).collect())
    }

    /// Get a goal by ID
    pub fn get_goal(&self, id: Uuid) -> Result<StudyGoal> {
        self.list_goals()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Goal {} not found", id)))
    }

    /// Create a new goal
    pub fn create_goal(&self, draft: GoalDraft, now: DateTime<Utc>) -> Result<StudyGoal> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StorageError::Validation("Please enter a goal title".to_string()));
        }

        let category = draft.category.trim();
        let goal = StudyGoal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            target_date: draft
                .target_date
                .unwrap_or_else(|| now + Duration::days(DEFAULT_TARGET_DAYS)),
            progress: 0,
            is_completed: false,
            created_at: now,
            priority: draft.priority,
            category: if category.is_empty() {
                DEFAULT_GOAL_CATEGORY.to_string()
            } else {
                category.to_string()
            },
        };

        let mut goals = self.list_goals()?;
        goals.insert(0, goal.clone());
        self.save_goals(&goals)?;

        Ok(goal)
    }

    /// Set progress to a percentage.
    ///
    /// Values outside 0..=100 are clamped; the goal counts as completed
    /// exactly when the requested value reaches 100.
    pub fn update_progress(&self, id: Uuid, progress: i32) -> Result<StudyGoal> {
        let mut goals = self.list_goals()?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Goal {} not found", id)))?;

        goal.progress = progress.clamp(0, 100) as u8;
        goal.is_completed = progress >= 100;

        let updated = goal.clone();
        self.save_goals(&goals)?;

        if updated.is_completed {
            log::info!("Goal {} completed", updated.id);
        }
        Ok(updated)
    }

    /// Move progress by `delta` percentage points
    pub fn adjust_progress(&self, id: Uuid, delta: i32) -> Result<StudyGoal> {
        let goal = self.get_goal(id)?;
        self.update_progress(id, (goal.progress as i32).saturating_add(delta))
    }

    /// Delete a goal
    pub fn delete_goal(&self, id: Uuid) -> Result<()> {
        let mut goals = self.list_goals()?;
        let len_before = goals.len();
        goals.retain(|g| g.id != id);

        if goals.len() == len_before {
            return Err(StorageError::NotFound(format!("Goal {} not found", id)));
        }

        self.save_goals(&goals)
    }

    fn save_goals(&self, goals: &[StudyGoal]) -> Result<()> {
        self.store.save_collection(StorageKey::Goals, goals)
    }
}
