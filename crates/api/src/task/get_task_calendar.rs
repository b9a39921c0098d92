use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::get_task_calendar::*;
use taskguide_domain::{TaskCalendarEntry, ID};
use taskguide_infra::TaskGuideContext;

pub async fn get_task_calendar_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let usecase = GetTaskCalendarUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(TaskGuideError::from)
}

/// All the `Task`s of a `User` as calendar entries, completed ones included
#[derive(Debug)]
pub struct GetTaskCalendarUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserNotFound(ID),
}

impl From<UseCaseError> for TaskGuideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTaskCalendarUseCase {
    type Response = Vec<TaskCalendarEntry>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetTaskCalendar";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut tasks = ctx
            .repos
            .tasks
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        tasks.sort_by_key(|t| t.deadline);

        Ok(tasks
            .iter()
            .map(|task| TaskCalendarEntry::new(task, now))
            .collect())
    }
}
