use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::delete_user::*;
use taskguide_domain::{User, ID};
use taskguide_infra::TaskGuideContext;
use tracing::error;

pub async fn delete_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let usecase = DeleteUserUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.user)))
        .map_err(TaskGuideError::from)
}

#[derive(Debug)]
struct DeleteUserUseCase {
    user_id: ID,
}

#[derive(Debug)]
struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
enum UseCaseError {
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
impl UseCase for DeleteUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteUser";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        // Tasks go first so that no task is ever left without an owner
        if let Err(e) = ctx.repos.tasks.delete_by_user(&self.user_id).await {
            error!("Unable to delete tasks of user: {}. Error: {:?}", self.user_id, e);
            return Err(UseCaseError::StorageError);
        }

        match ctx.repos.users.delete(&self.user_id).await {
            Some(user) => Ok(UseCaseRes { user }),
            None => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use taskguide_domain::Task;

    #[actix_web::main]
    #[test]
    async fn deletes_user_and_their_tasks() {
        let ctx = TaskGuideContext::create_inmemory();
        let user = User::new("johnny_b".into(), "johnny@example.com".into(), 0).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();
        let now = ctx.sys.get_timestamp_millis();
        let task = Task::new(user.id.clone(), "Title".into(), now + 1000 * 60 * 60, now).unwrap();
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut usecase = DeleteUserUseCase {
            user_id: user.id.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.users.find(&user.id).await.is_none());
        assert!(ctx.repos.tasks.find(&task.id).await.is_none());

        let mut usecase = DeleteUserUseCase {
            user_id: user.id.clone(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::UserNotFound(_))
        ));
    }
}
