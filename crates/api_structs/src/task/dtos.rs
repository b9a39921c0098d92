use serde::{Deserialize, Serialize};
use taskguide_domain::{Task, TaskCalendarEntry, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub deadline: i64,
    pub priority: i64,
    pub file_url: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<i64>,
    pub reminder_24h_sent: bool,
    pub reminder_12h_sent: bool,
    pub reminder_2h_sent: bool,
    pub last_reminder_sent_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl TaskDTO {
    pub fn new(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            deadline: task.deadline,
            priority: task.priority,
            file_url: task.file_url,
            is_completed: task.is_completed,
            completed_at: task.completed_at,
            reminder_24h_sent: task.reminder_24h_sent,
            reminder_12h_sent: task.reminder_12h_sent,
            reminder_2h_sent: task.reminder_2h_sent,
            last_reminder_sent_at: task.last_reminder_sent_at,
            created: task.created,
            updated: task.updated,
        }
    }
}

/// An entry in the format calendar widgets expect
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskCalendarEntryDTO {
    pub task_id: ID,
    pub title: String,
    pub start: i64,
    pub background_color: String,
    pub text_color: String,
}

impl TaskCalendarEntryDTO {
    pub fn new(entry: TaskCalendarEntry) -> Self {
        Self {
            task_id: entry.task_id,
            title: entry.title,
            start: entry.start,
            background_color: entry.background_color.to_string(),
            text_color: entry.text_color.to_string(),
        }
    }
}
