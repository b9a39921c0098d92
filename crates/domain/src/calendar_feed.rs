use crate::{shared::entity::ID, task::Task};

const COMPLETED_COLOR: &str = "#6c757d";
const OVERDUE_COLOR: &str = "#f88383";
const HIGH_PRIORITY_COLOR: &str = "#ff0000";
const MEDIUM_PRIORITY_COLOR: &str = "#fd7e14";
const LOW_PRIORITY_COLOR: &str = "#198754";
const TEXT_COLOR: &str = "#ffffff";

/// An entry of the calendar view, one per `Task`, placed at its deadline
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCalendarEntry {
    pub task_id: ID,
    pub title: String,
    pub start: i64,
    pub background_color: &'static str,
    pub text_color: &'static str,
}

impl TaskCalendarEntry {
    pub fn new(task: &Task, now: i64) -> Self {
        let background_color = if task.is_completed {
            COMPLETED_COLOR
        } else if task.deadline < now {
            OVERDUE_COLOR
        } else {
            match task.priority {
                1 => HIGH_PRIORITY_COLOR,
                2 => MEDIUM_PRIORITY_COLOR,
                _ => LOW_PRIORITY_COLOR,
            }
        };

        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            start: task.deadline,
            background_color,
            text_color: TEXT_COLOR,
        }
    }
}
