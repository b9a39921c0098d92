use super::ITaskRepo;
use crate::repos::shared::repo::DeleteResult;
use sqlx::{types::Uuid, FromRow, PgPool};
use taskguide_domain::{Task, TaskReminderCandidate, ID};
use tracing::error;

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: String,
    deadline: i64,
    priority: i64,
    file_url: Option<String>,
    is_completed: bool,
    completed_at: Option<i64>,
    reminder_24h_sent: bool,
    reminder_12h_sent: bool,
    reminder_2h_sent: bool,
    last_reminder_sent_at: Option<i64>,
    created: i64,
    updated: i64,
}

#[derive(Debug, FromRow)]
struct TaskReminderCandidateRaw {
    #[sqlx(flatten)]
    task: TaskRaw,
    recipient_email: String,
    recipient_name: String,
}

impl From<TaskRaw> for Task {
    fn from(raw: TaskRaw) -> Self {
        Self {
            id: raw.task_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            deadline: raw.deadline,
            priority: raw.priority,
            file_url: raw.file_url,
            is_completed: raw.is_completed,
            completed_at: raw.completed_at,
            reminder_24h_sent: raw.reminder_24h_sent,
            reminder_12h_sent: raw.reminder_12h_sent,
            reminder_2h_sent: raw.reminder_2h_sent,
            last_reminder_sent_at: raw.last_reminder_sent_at,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

impl From<TaskReminderCandidateRaw> for TaskReminderCandidate {
    fn from(raw: TaskReminderCandidateRaw) -> Self {
        Self {
            task: raw.task.into(),
            recipient_email: raw.recipient_email,
            recipient_name: raw.recipient_name,
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks(
                task_uid,
                user_uid,
                title,
                description,
                deadline,
                priority,
                file_url,
                is_completed,
                completed_at,
                reminder_24h_sent,
                reminder_12h_sent,
                reminder_2h_sent,
                last_reminder_sent_at,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(task.user_id.inner_ref())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.deadline)
        .bind(task.priority)
        .bind(&task.file_url)
        .bind(task.is_completed)
        .bind(task.completed_at)
        .bind(task.reminder_24h_sent)
        .bind(task.reminder_12h_sent)
        .bind(task.reminder_2h_sent)
        .bind(task.last_reminder_sent_at)
        .bind(task.created)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks SET
                title = $2,
                description = $3,
                deadline = $4,
                priority = $5,
                file_url = $6,
                is_completed = $7,
                completed_at = $8,
                updated = $9
            WHERE task_uid = $1
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.deadline)
        .bind(task.priority)
        .bind(&task.file_url)
        .bind(task.is_completed)
        .bind(task.completed_at)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find task with id: {}. Error: {:?}", task_id, e))
        .ok()
        .flatten()
        .map(Task::from)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, TaskRaw>(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn delete(&self, task_id: &ID) -> Option<Task> {
        sqlx::query_as::<_, TaskRaw>(
            r#"
            DELETE FROM tasks AS t
            WHERE t.task_uid = $1
            RETURNING *
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to delete task with id: {}. Error: {:?}", task_id, e))
        .ok()
        .flatten()
        .map(Task::from)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM tasks AS t
            WHERE t.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn find_reminder_candidates(&self, now: i64) -> anyhow::Result<Vec<TaskReminderCandidate>> {
        let candidates = sqlx::query_as::<_, TaskReminderCandidateRaw>(
            r#"
            SELECT t.*, u.email AS recipient_email, u.username AS recipient_name
            FROM tasks AS t
            INNER JOIN users AS u
                ON u.user_uid = t.user_uid
            WHERE t.deadline > $1 AND t.is_completed = FALSE
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates
            .into_iter()
            .map(TaskReminderCandidate::from)
            .collect())
    }

    async fn save_reminder_state(&self, tasks: &[Task]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for task in tasks {
            sqlx::query(
                r#"
                UPDATE tasks SET
                    reminder_24h_sent = reminder_24h_sent OR $2,
                    reminder_12h_sent = reminder_12h_sent OR $3,
                    reminder_2h_sent = reminder_2h_sent OR $4,
                    last_reminder_sent_at = GREATEST(last_reminder_sent_at, $5)
                WHERE task_uid = $1
                "#,
            )
            .bind(task.id.inner_ref())
            .bind(task.reminder_24h_sent)
            .bind(task.reminder_12h_sent)
            .bind(task.reminder_2h_sent)
            .bind(task.last_reminder_sent_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }
}
