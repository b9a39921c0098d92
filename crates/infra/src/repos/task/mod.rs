mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;
use taskguide_domain::{Task, TaskReminderCandidate, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    /// Saves the editable fields of the `Task`. Reminder state is left
    /// untouched, it is only written by `save_reminder_state`.
    async fn save(&self, task: &Task) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> Option<Task>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Task>>;
    async fn delete(&self, task_id: &ID) -> Option<Task>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
    /// Finds all the `Task`s that are not completed and have a deadline
    /// strictly after `now`, together with the contact details of their owner
    async fn find_reminder_candidates(&self, now: i64) -> anyhow::Result<Vec<TaskReminderCandidate>>;
    /// Persists the reminder flags and `last_reminder_sent_at` of all the
    /// given `Task`s as one batch. Flags are never cleared and the timestamp
    /// never moves backwards.
    async fn save_reminder_state(&self, tasks: &[Task]) -> anyhow::Result<()>;
}
