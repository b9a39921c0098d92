use super::subscribers::SendEmailOnTaskCreated;
use crate::error::TaskGuideError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use taskguide_api_structs::create_task::*;
use taskguide_domain::{Task, TaskValidationError, User, ID};
use taskguide_infra::TaskGuideContext;

pub async fn create_task_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    let body = body.0;
    let usecase = CreateTaskUseCase {
        user_id: path_params.user_id.clone(),
        title: body.title,
        description: body.description.unwrap_or_default(),
        deadline: body.deadline,
        priority: body.priority.unwrap_or_default(),
        file_url: body.file_url,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Created().json(APIResponse::new(usecase_res.task)))
        .map_err(TaskGuideError::from)
}

#[derive(Debug)]
pub struct CreateTaskUseCase {
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub deadline: i64,
    pub priority: i64,
    pub file_url: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub task: Task,
    pub owner: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserNotFound(ID),
    InvalidTask(TaskValidationError),
}

impl From<UseCaseError> for TaskGuideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::InvalidTask(e) => Self::BadClientData(e.to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTaskUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateTask";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        let owner = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };

        let mut task = Task::new(
            owner.id.clone(),
            self.title.clone(),
            self.deadline,
            ctx.sys.get_timestamp_millis(),
        )
        .map_err(UseCaseError::InvalidTask)?;
        task.description = self.description.clone();
        task.priority = self.priority;
        task.file_url = self.file_url.clone();

        ctx.repos
            .tasks
            .insert(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { task, owner })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendEmailOnTaskCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::task::test_helpers::*;
    use std::sync::Arc;
    use taskguide_infra::{InMemoryNotifier, StaticTimeSys};

    const NOW: i64 = 1_743_465_600_000;

    struct TestContext {
        ctx: TaskGuideContext,
        notifier: Arc<InMemoryNotifier>,
        user: User,
    }

    async fn setup() -> TestContext {
        let notifier = Arc::new(InMemoryNotifier::new());
        let mut ctx = TaskGuideContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::new(NOW));
        ctx.notifier = notifier.clone();
        let user = insert_user(&ctx).await;
        TestContext {
            ctx,
            notifier,
            user,
        }
    }

    fn usecase(user_id: ID, title: &str, deadline: i64) -> CreateTaskUseCase {
        CreateTaskUseCase {
            user_id,
            title: title.into(),
            description: "Before the 5th".into(),
            deadline,
            priority: 1,
            file_url: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_task_and_sends_email() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;

        let res = execute(usecase(user.id.clone(), "Pay rent", NOW + HOUR), &ctx)
            .await
            .unwrap();
        assert_eq!(res.task.title, "Pay rent");
        assert_eq!(res.task.priority, 1);
        assert!(!res.task.reminder_24h_sent);
        assert!(ctx.repos.tasks.find(&res.task.id).await.is_some());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "johnny@example.com");
        assert!(sent[0].html_body.contains("Pay rent"));
    }

    #[actix_web::main]
    #[test]
    async fn creates_task_even_if_email_fails() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        notifier.fail_for("johnny@example.com");

        let res = execute(usecase(user.id.clone(), "Pay rent", NOW + HOUR), &ctx).await;
        assert!(res.is_ok());
        assert!(notifier.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_tasks() {
        let TestContext { ctx, user, .. } = setup().await;

        let mut past_deadline = usecase(user.id.clone(), "Pay rent", NOW);
        assert!(matches!(
            past_deadline.execute(&ctx).await,
            Err(UseCaseError::InvalidTask(TaskValidationError::DeadlineInPast(_)))
        ));

        let mut empty_title = usecase(user.id.clone(), "   ", NOW + HOUR);
        assert!(matches!(
            empty_title.execute(&ctx).await,
            Err(UseCaseError::InvalidTask(TaskValidationError::EmptyTitle))
        ));

        let mut unknown_user = usecase(ID::default(), "Pay rent", NOW + HOUR);
        assert!(matches!(
            unknown_user.execute(&ctx).await,
            Err(UseCaseError::UserNotFound(_))
        ));
    }
}
