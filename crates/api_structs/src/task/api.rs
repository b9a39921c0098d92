use crate::dtos::{TaskCalendarEntryDTO, TaskDTO};
use serde::{Deserialize, Serialize};
use taskguide_domain::{Task, TaskCalendarEntry, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task: TaskDTO,
}

impl TaskResponse {
    pub fn new(task: Task) -> Self {
        Self {
            task: TaskDTO::new(task),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TaskPathParams {
    pub user_id: ID,
    pub task_id: ID,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserTasksPathParams {
    pub user_id: ID,
}

pub mod create_task {
    use super::*;

    pub type PathParams = UserTasksPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        pub deadline: i64,
        #[serde(default)]
        pub priority: Option<i64>,
        #[serde(default)]
        pub file_url: Option<String>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod get_task {
    use super::*;

    pub type PathParams = TaskPathParams;

    pub type APIResponse = TaskResponse;
}

pub mod get_tasks {
    use super::*;

    pub type PathParams = UserTasksPathParams;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum TaskSortOrder {
        /// Lowest priority first
        PriorityAsc,
        /// Highest priority first
        PriorityDesc,
        /// Earliest deadline first
        Deadline,
    }

    impl Default for TaskSortOrder {
        fn default() -> Self {
            Self::Deadline
        }
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub sort_by: Option<TaskSortOrder>,
        #[serde(default)]
        pub priority: Option<i64>,
        #[serde(default)]
        pub show_completed: Option<bool>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub tasks: Vec<TaskDTO>,
    }

    impl APIResponse {
        pub fn new(tasks: Vec<Task>) -> Self {
            Self {
                tasks: tasks.into_iter().map(TaskDTO::new).collect(),
            }
        }
    }
}

pub mod update_task {
    use super::*;

    pub type PathParams = TaskPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub deadline: Option<i64>,
        #[serde(default)]
        pub priority: Option<i64>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod complete_task {
    use super::*;

    pub type PathParams = TaskPathParams;

    pub type APIResponse = TaskResponse;
}

pub mod delete_task {
    use super::*;

    pub type PathParams = TaskPathParams;

    pub type APIResponse = TaskResponse;
}

pub mod get_task_calendar {
    use super::*;

    pub type PathParams = UserTasksPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entries: Vec<TaskCalendarEntryDTO>,
    }

    impl APIResponse {
        pub fn new(entries: Vec<TaskCalendarEntry>) -> Self {
            Self {
                entries: entries
                    .into_iter()
                    .map(TaskCalendarEntryDTO::new)
                    .collect(),
            }
        }
    }
}
