use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use taskguide_api_structs::get_tasks::TaskSortOrder;
use taskguide_api_structs::*;
use taskguide_domain::ID;

#[derive(Clone)]
pub struct TaskClient {
    base: Arc<BaseClient>,
}

pub struct CreateTaskInput {
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub deadline: i64,
    pub priority: Option<i64>,
    pub file_url: Option<String>,
}

#[derive(Default)]
pub struct GetTasksInput {
    pub user_id: ID,
    pub sort_by: Option<TaskSortOrder>,
    pub priority: Option<i64>,
    pub show_completed: Option<bool>,
}

impl GetTasksInput {
    fn to_query_string(&self) -> String {
        let mut query = Vec::new();
        if let Some(sort_by) = self.sort_by {
            let sort_by = match sort_by {
                TaskSortOrder::PriorityAsc => "priorityAsc",
                TaskSortOrder::PriorityDesc => "priorityDesc",
                TaskSortOrder::Deadline => "deadline",
            };
            query.push(format!("sortBy={}", sort_by));
        }
        if let Some(priority) = self.priority {
            query.push(format!("priority={}", priority));
        }
        if let Some(show_completed) = self.show_completed {
            query.push(format!("showCompleted={}", show_completed));
        }
        query.join("&")
    }
}

pub struct UpdateTaskInput {
    pub user_id: ID,
    pub task_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<i64>,
    pub priority: Option<i64>,
}

impl TaskClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateTaskInput) -> APIResponse<create_task::APIResponse> {
        let body = create_task::RequestBody {
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            priority: input.priority,
            file_url: input.file_url,
        };
        self.base
            .post(
                body,
                format!("user/{}/tasks", input.user_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get(&self, user_id: ID, task_id: ID) -> APIResponse<get_task::APIResponse> {
        self.base
            .get(format!("user/{}/tasks/{}", user_id, task_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self, input: GetTasksInput) -> APIResponse<get_tasks::APIResponse> {
        self.base
            .get(
                format!("user/{}/tasks?{}", input.user_id, input.to_query_string()),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update(&self, input: UpdateTaskInput) -> APIResponse<update_task::APIResponse> {
        let body = update_task::RequestBody {
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            priority: input.priority,
        };
        self.base
            .put(
                body,
                format!("user/{}/tasks/{}", input.user_id, input.task_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn complete(
        &self,
        user_id: ID,
        task_id: ID,
    ) -> APIResponse<complete_task::APIResponse> {
        self.base
            .post_without_body(
                format!("user/{}/tasks/{}/complete", user_id, task_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, user_id: ID, task_id: ID) -> APIResponse<delete_task::APIResponse> {
        self.base
            .delete(format!("user/{}/tasks/{}", user_id, task_id), StatusCode::OK)
            .await
    }

    pub async fn calendar(&self, user_id: ID) -> APIResponse<get_task_calendar::APIResponse> {
        self.base
            .get(format!("user/{}/tasks/calendar", user_id), StatusCode::OK)
            .await
    }

    pub async fn statistics(&self, user_id: ID) -> APIResponse<get_statistics::APIResponse> {
        self.base
            .get(format!("user/{}/statistics", user_id), StatusCode::OK)
            .await
    }
}
