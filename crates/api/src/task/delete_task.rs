use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::delete_task::*;
use taskguide_domain::{Task, ID};
use taskguide_infra::TaskGuideContext;

pub async fn delete_task_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let usecase = DeleteTaskUseCase {
        user_id: path_params.user_id.clone(),
        task_id: path_params.task_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TaskGuideError::from)
}

#[derive(Debug)]
pub struct DeleteTaskUseCase {
    pub user_id: ID,
    pub task_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
}

impl From<UseCaseError> for TaskGuideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A task with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTaskUseCase {
    type Response = Task;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTask";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) if task.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.task_id.clone())),
        };

        ctx.repos
            .tasks
            .delete(&self.task_id)
            .await
            .ok_or(UseCaseError::StorageError)
    }
}
