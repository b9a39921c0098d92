use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::update_task::*;
use taskguide_domain::{Task, TaskValidationError, ID};
use taskguide_infra::TaskGuideContext;

pub async fn update_task_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let body = body.0;
    let usecase = UpdateTaskUseCase {
        user_id: path_params.user_id.clone(),
        task_id: path_params.task_id.clone(),
        title: body.title,
        description: body.description,
        deadline: body.deadline,
        priority: body.priority,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TaskGuideError::from)
}

/// Edits a `Task`. Reminder flags are kept as they are, also when the
/// deadline is moved.
#[derive(Debug)]
pub struct UpdateTaskUseCase {
    pub user_id: ID,
    pub task_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<i64>,
    pub priority: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    InvalidTask(TaskValidationError),
}

impl From<UseCaseError> for TaskGuideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A task with id: {}, was not found.", id))
            }
            UseCaseError::InvalidTask(e) => Self::BadClientData(e.to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTaskUseCase {
    type Response = Task;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTask";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        let mut task = match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) if task.user_id == self.user_id => task,
            _ => return Err(UseCaseError::NotFound(self.task_id.clone())),
        };

        if let Some(title) = &self.title {
            task.title = Task::validate_title(title.clone()).map_err(UseCaseError::InvalidTask)?;
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        task.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .tasks
            .save(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}
