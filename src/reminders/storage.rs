//! Reminders storage implementation

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::*;
use crate::storage::{Result, StorageError, StorageKey, StudyStore};

#[derive(Clone)]
pub struct RemindersStorage {
    store: StudyStore,
}

impl RemindersStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    pub fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.store.load_collection(StorageKey::Reminders)
    }

    pub fn get_reminder(&self, id: Uuid) -> Result<Reminder> {
        self.list_reminders()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Reminder {} not found", id)))
    }

    pub fn add_reminder(&self, draft: ReminderDraft) -> Result<Reminder> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StorageError::Validation(
                "Please enter a reminder title".to_string(),
            ));
        }

        let reminder = Reminder {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            due_date: draft.due_date,
            is_completed: false,
            priority: draft.priority,
            reminder_type: draft.reminder_type,
        };

        let mut reminders = self.list_reminders()?;
        reminders.push(reminder.clone());
        self.save_reminders(&reminders)?;

        Ok(reminder)
    }

    /// Mark a reminder as done
    pub fn complete_reminder(&self, id: Uuid) -> Result<Reminder> {
        let mut reminders = self.list_reminders()?;
        let reminder = reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Reminder {} not found", id)))?;

        reminder.is_completed = true;
        let updated = reminder.clone();
        self.save_reminders(&reminders)?;

        Ok(updated)
    }

    pub fn delete_reminder(&self, id: Uuid) -> Result<()> {
        let mut reminders = self.list_reminders()?;
        let len_before = reminders.len();
        reminders.retain(|r| r.id != id);

        if reminders.len() == len_before {
            return Err(StorageError::NotFound(format!("Reminder {} not found", id)));
        }

        self.save_reminders(&reminders)
    }

    /// Incomplete reminders, soonest first. Past-due ones are included.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>> {
        let mut pending: Vec<Reminder> = self
            .list_reminders()?
            .into_iter()
            .filter(|r| !r.is_completed)
            .collect();
        pending.sort_by_key(|r| r.due_date);

        let overdue = pending.iter().filter(|r| r.due_date < now).count();
        if overdue > 0 {
            log::debug!("{} reminder(s) past due", overdue);
        }
        Ok(pending)
    }

    fn save_reminders(&self, reminders: &[Reminder]) -> Result<()> {
        self.store.save_collection(StorageKey::Reminders, reminders)
    }
}
