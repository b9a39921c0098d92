use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::get_tasks::*;
use taskguide_domain::{Task, ID};
use taskguide_infra::TaskGuideContext;

pub async fn get_tasks_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let query = query_params.into_inner();
    let usecase = GetTasksUseCase {
        user_id: path_params.user_id.clone(),
        sort_by: query.sort_by.unwrap_or_default(),
        priority: query.priority,
        show_completed: query.show_completed.unwrap_or(false),
    };

    execute(usecase, &ctx)
        .await
        .map(|tasks| HttpResponse::Ok().json(APIResponse::new(tasks)))
        .map_err(TaskGuideError::from)
}

/// Lists the `Task`s of a `User`. Unless `show_completed` is set, only
/// tasks that can still be worked on are listed.
#[derive(Debug)]
pub struct GetTasksUseCase {
    pub user_id: ID,
    pub sort_by: TaskSortOrder,
    pub priority: Option<i64>,
    pub show_completed: bool,
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
impl UseCase for GetTasksUseCase {
    type Response = Vec<Task>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetTasks";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut tasks: Vec<Task> = ctx
            .repos
            .tasks
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .filter(|t| match self.priority {
                Some(priority) => t.priority == priority,
                None => true,
            })
            .filter(|t| self.show_completed || (!t.is_completed && t.deadline > now))
            .collect();

        match self.sort_by {
            TaskSortOrder::PriorityAsc => tasks.sort_by(|a, b| b.priority.cmp(&a.priority)),
            TaskSortOrder::PriorityDesc => tasks.sort_by_key(|t| t.priority),
            TaskSortOrder::Deadline => tasks.sort_by_key(|t| t.deadline),
        }

        Ok(tasks)
    }
}
