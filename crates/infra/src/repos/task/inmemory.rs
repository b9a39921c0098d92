use super::ITaskRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use crate::repos::user::IUserRepo;
use std::sync::Arc;
use taskguide_domain::{Task, TaskReminderCandidate, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
    users: Arc<dyn IUserRepo>,
}

impl InMemoryTaskRepo {
    pub fn new(users: Arc<dyn IUserRepo>) -> Self {
        Self {
            tasks: std::sync::Mutex::new(Vec::new()),
            users,
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks);
        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        update_many(
            &self.tasks,
            |t| t.id == task.id,
            |t| {
                t.title = task.title.clone();
                t.description = task.description.clone();
                t.deadline = task.deadline;
                t.priority = task.priority;
                t.file_url = task.file_url.clone();
                t.is_completed = task.is_completed;
                t.completed_at = task.completed_at;
                t.updated = task.updated;
            },
        );
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        find(task_id, &self.tasks)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Task>> {
        Ok(find_by(&self.tasks, |t| t.user_id == *user_id))
    }

    async fn delete(&self, task_id: &ID) -> Option<Task> {
        delete(task_id, &self.tasks)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.tasks, |t| t.user_id == *user_id))
    }

    async fn find_reminder_candidates(&self, now: i64) -> anyhow::Result<Vec<TaskReminderCandidate>> {
        let tasks = find_by(&self.tasks, |t| !t.is_completed && t.deadline > now);

        let mut candidates = Vec::with_capacity(tasks.len());
        for task in tasks {
            if let Some(owner) = self.users.find(&task.user_id).await {
                candidates.push(TaskReminderCandidate {
                    task,
                    recipient_email: owner.email,
                    recipient_name: owner.username,
                });
            }
        }
        Ok(candidates)
    }

    async fn save_reminder_state(&self, tasks: &[Task]) -> anyhow::Result<()> {
        update_many(
            &self.tasks,
            |t| tasks.iter().any(|changed| changed.id == t.id),
            |t| {
                let id = t.id.clone();
                for changed in tasks.iter().filter(|changed| changed.id == id) {
                    t.reminder_24h_sent |= changed.reminder_24h_sent;
                    t.reminder_12h_sent |= changed.reminder_12h_sent;
                    t.reminder_2h_sent |= changed.reminder_2h_sent;
                    if let Some(sent_at) = changed.last_reminder_sent_at {
                        t.record_reminder_sent(sent_at);
                    }
                }
            },
        );
        Ok(())
    }
}
