use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::create_user::*;
use taskguide_domain::{User, UserValidationError};
use taskguide_infra::TaskGuideContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let body = body.0;
    let usecase = CreateUserUseCase {
        username: body.username,
        email: body.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Created().json(APIResponse::new(usecase_res.user)))
        .map_err(TaskGuideError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub username: String,
    pub email: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    InvalidUser(UserValidationError),
    EmailTaken(String),
}

impl From<UseCaseError> for TaskGuideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::InvalidUser(e) => Self::BadClientData(e.to_string()),
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A user with the email: {} already exists.",
                email
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        let user = User::new(
            self.username.clone(),
            self.email.clone(),
            ctx.sys.get_timestamp_millis(),
        )
        .map_err(UseCaseError::InvalidUser)?;

        if ctx.repos.users.find_by_email(&user.email).await.is_some() {
            return Err(UseCaseError::EmailTaken(user.email));
        }

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { user })
    }
}
