use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::dtos::StatisticsDTO;
use taskguide_api_structs::get_statistics::*;
use taskguide_domain::{Statistics, TaskStatusCounts, ID};
use taskguide_infra::TaskGuideContext;

pub async fn get_statistics_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let usecase = GetStatisticsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                statistics: StatisticsDTO::new(res.statistics, res.status_counts),
            })
        })
        .map_err(TaskGuideError::from)
}

#[derive(Debug)]
pub struct GetStatisticsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub statistics: Statistics,
    pub status_counts: TaskStatusCounts,
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
impl UseCase for GetStatisticsUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetStatistics";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let tasks = ctx
            .repos
            .tasks
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let now = ctx.sys.get_timestamp_millis();

        Ok(UseCaseRes {
            statistics: Statistics::calculate(&tasks, now),
            status_counts: TaskStatusCounts::calculate(&tasks, now),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use taskguide_domain::{Task, User};
    use taskguide_infra::StaticTimeSys;

    const DAY: i64 = 1000 * 60 * 60 * 24;
    const NOW: i64 = 1_743_465_600_000;

    #[actix_web::main]
    #[test]
    async fn calculates_statistics_of_user() {
        let mut ctx = TaskGuideContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::new(NOW));
        let user = User::new("johnny_b".into(), "johnny@example.com".into(), 0).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();
        let other = User::new("other_user".into(), "other@example.com".into(), 0).unwrap();
        ctx.repos.users.insert(&other).await.unwrap();

        for deadline in &[NOW + DAY, NOW + 10 * DAY, NOW - DAY] {
            let task = Task::new(user.id.clone(), "Title".into(), *deadline, NOW - 2 * DAY).unwrap();
            ctx.repos.tasks.insert(&task).await.unwrap();
        }
        let mut completed = Task::new(user.id.clone(), "Title".into(), NOW + DAY, NOW - DAY).unwrap();
        completed.complete(NOW);
        ctx.repos.tasks.insert(&completed).await.unwrap();
        let not_mine = Task::new(other.id.clone(), "Title".into(), NOW + DAY, NOW).unwrap();
        ctx.repos.tasks.insert(&not_mine).await.unwrap();

        let mut usecase = GetStatisticsUseCase {
            user_id: user.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.statistics.total_tasks, 4);
        assert_eq!(res.statistics.completed_tasks, 1);
        assert_eq!(res.statistics.overdue_tasks, 1);
        assert_eq!(res.statistics.tasks_next_3_days, 1);
        assert_eq!(res.statistics.tasks_next_30_days, 2);
        assert_eq!(res.statistics.completion_rate, 25.0);
        assert_eq!(res.status_counts.pending, 2);
    }

    #[actix_web::main]
    #[test]
    async fn user_without_tasks_has_zero_completion_rate() {
        let ctx = TaskGuideContext::create_inmemory();
        let user = User::new("johnny_b".into(), "johnny@example.com".into(), 0).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = GetStatisticsUseCase {
            user_id: user.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.statistics.total_tasks, 0);
        assert_eq!(res.statistics.completion_rate, 0.0);
    }
}
