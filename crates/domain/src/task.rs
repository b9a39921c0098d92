use crate::shared::entity::{Entity, ID};
use thiserror::Error;

/// A `Task` is a piece of work a `User` has to finish before its `deadline`.
///
/// The reminder flags are owned by the reminder scheduler. They only ever
/// go from `false` to `true` and are not reset when the task is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: String,
    /// Timestamp in millis (UTC) at which the task is due
    pub deadline: i64,
    /// 1 is high, 2 is medium and everything else is low
    pub priority: i64,
    /// Link to an attachment stored by the external object storage
    pub file_url: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<i64>,
    pub reminder_24h_sent: bool,
    pub reminder_12h_sent: bool,
    pub reminder_2h_sent: bool,
    /// Last time any reminder was successfully delivered. Audit only.
    pub last_reminder_sent_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum TaskValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("The deadline: {0} has already passed")]
    DeadlineInPast(i64),
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Task {
    pub fn new(
        user_id: ID,
        title: String,
        deadline: i64,
        now: i64,
    ) -> Result<Self, TaskValidationError> {
        let title = Self::validate_title(title)?;
        if deadline <= now {
            return Err(TaskValidationError::DeadlineInPast(deadline));
        }

        Ok(Self {
            id: Default::default(),
            user_id,
            title,
            description: String::new(),
            deadline,
            priority: 0,
            file_url: None,
            is_completed: false,
            completed_at: None,
            reminder_24h_sent: false,
            reminder_12h_sent: false,
            reminder_2h_sent: false,
            last_reminder_sent_at: None,
            created: now,
            updated: now,
        })
    }

    pub fn validate_title(title: String) -> Result<String, TaskValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(title.to_string())
    }

    /// Marks the `Task` as completed. Returns false if it already was.
    pub fn complete(&mut self, now: i64) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        self.completed_at = Some(now);
        self.updated = now;
        true
    }

    pub fn is_overdue(&self, now: i64) -> bool {
        !self.is_completed && self.deadline < now
    }

    /// Records a delivered reminder. The timestamp never moves backwards.
    pub fn record_reminder_sent(&mut self, now: i64) {
        match self.last_reminder_sent_at {
            Some(last) if last >= now => (),
            _ => self.last_reminder_sent_at = Some(now),
        }
    }
}
