use crate::error::TaskGuideError;
use crate::shared::{
    auth::protect_reminder_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use futures::future::join_all;
use taskguide_api_structs::send_task_reminders::*;
use taskguide_domain::{ReminderEmail, ReminderThreshold, TaskReminderCandidate};
use taskguide_infra::TaskGuideContext;
use tracing::{error, info, warn};

pub async fn send_task_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<TaskGuideContext>,
) -> Result<HttpResponse, TaskGuideError> {
    protect_reminder_route(&http_req, &ctx)?;

    let usecase = SendTaskRemindersUseCase {
        now: ctx.sys.get_timestamp_millis(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.sent, res.failed)))
        .map_err(TaskGuideError::from)
}

/// Sends the deadline reminders that are due at `now`.
///
/// A reminder threshold is marked as sent before the email goes out and is
/// kept that way even if the delivery fails, so every threshold is attempted
/// at most once per `Task`.
#[derive(Debug)]
pub struct SendTaskRemindersUseCase {
    pub now: i64,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseRes {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TaskGuideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTaskRemindersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendTaskReminders";

    async fn execute(&mut self, ctx: &TaskGuideContext) -> Result<Self::Response, Self::Error> {
        let now = self.now;
        let _guard = ctx.reminder_lock.lock().await;

        let candidates = ctx
            .repos
            .tasks
            .find_reminder_candidates(now)
            .await
            .map_err(|e| {
                error!("Unable to fetch reminder candidates. Error: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut due: Vec<(TaskReminderCandidate, ReminderThreshold)> = Vec::new();
        for mut candidate in candidates {
            if let Some(threshold) = ReminderThreshold::classify(&candidate.task, now) {
                threshold.mark_sent(&mut candidate.task);
                due.push((candidate, threshold));
            }
        }

        if due.is_empty() {
            return Ok(UseCaseRes { sent: 0, failed: 0 });
        }

        let deliveries = due.iter().map(|(candidate, _)| {
            let email = ReminderEmail::new(candidate, now);
            async move {
                ctx.notifier
                    .send(&email.to_email, &email.to_name, &email.subject, &email.html_body)
                    .await
            }
        });
        let delivered = join_all(deliveries).await;

        let mut res = UseCaseRes { sent: 0, failed: 0 };
        let mut changed = Vec::with_capacity(due.len());
        for ((mut candidate, threshold), delivered) in due.into_iter().zip(delivered) {
            if delivered {
                candidate.task.record_reminder_sent(now);
                res.sent += 1;
                info!(
                    "Sent {}h reminder for task: {}",
                    threshold.hours(),
                    candidate.task.id
                );
            } else {
                res.failed += 1;
                warn!(
                    "Unable to send {}h reminder for task: {}",
                    threshold.hours(),
                    candidate.task.id
                );
            }
            changed.push(candidate.task);
        }

        ctx.repos
            .tasks
            .save_reminder_state(&changed)
            .await
            .map_err(|e| {
                error!("Unable to save reminder state. Error: {:?}", e);
                UseCaseError::StorageError
            })?;

        Ok(res)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use taskguide_domain::{Task, TaskReminderCandidate, User, ID};
    use taskguide_infra::{
        DeleteResult, ITaskRepo, InMemoryNotifier, InMemoryTaskRepo, InMemoryUserRepo,
    };

    const HOUR: i64 = 1000 * 60 * 60;
    const NOW: i64 = 1_743_465_600_000;

    struct TestContext {
        ctx: TaskGuideContext,
        notifier: Arc<InMemoryNotifier>,
        user: User,
    }

    async fn setup() -> TestContext {
        let notifier = Arc::new(InMemoryNotifier::new());
        let mut ctx = TaskGuideContext::create_inmemory();
        ctx.notifier = notifier.clone();
        let user = insert_user(&ctx, "johnny_b", "johnny@example.com").await;
        TestContext {
            ctx,
            notifier,
            user,
        }
    }

    async fn insert_user(ctx: &TaskGuideContext, username: &str, email: &str) -> User {
        let user = User::new(username.into(), email.into(), 0).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    async fn insert_task(ctx: &TaskGuideContext, user: &User, deadline: i64) -> Task {
        let task = Task::new(user.id.clone(), "Title".into(), deadline, NOW - 48 * HOUR).unwrap();
        ctx.repos.tasks.insert(&task).await.unwrap();
        task
    }

    async fn run(ctx: &TaskGuideContext, now: i64) -> Result<UseCaseRes, UseCaseError> {
        let mut usecase = SendTaskRemindersUseCase { now };
        usecase.execute(ctx).await
    }

    #[actix_web::main]
    #[test]
    async fn sends_due_reminders() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let due = insert_task(&ctx, &user, NOW + 24 * HOUR + HOUR / 10).await;
        let not_due = insert_task(&ctx, &user, NOW + 18 * HOUR).await;

        let res = run(&ctx, NOW).await.unwrap();
        assert_eq!(res, UseCaseRes { sent: 1, failed: 0 });

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "johnny@example.com");
        assert_eq!(sent[0].to_name, "johnny_b");
        assert_eq!(sent[0].subject, ReminderEmail::SUBJECT);
        assert!(sent[0].html_body.contains("24 h."));

        let due = ctx.repos.tasks.find(&due.id).await.unwrap();
        assert!(due.reminder_24h_sent);
        assert_eq!(due.last_reminder_sent_at, Some(NOW));
        let not_due = ctx.repos.tasks.find(&not_due.id).await.unwrap();
        assert!(!not_due.reminder_24h_sent && !not_due.reminder_12h_sent);
        assert_eq!(not_due.last_reminder_sent_at, None);
    }

    #[actix_web::main]
    #[test]
    async fn running_twice_sends_each_reminder_once() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        insert_task(&ctx, &user, NOW + 24 * HOUR).await;
        insert_task(&ctx, &user, NOW + 2 * HOUR).await;

        assert_eq!(run(&ctx, NOW).await.unwrap().sent, 2);
        assert_eq!(run(&ctx, NOW).await.unwrap().sent, 0);
        // Still inside the tolerance window
        assert_eq!(run(&ctx, NOW + HOUR / 5).await.unwrap().sent, 0);
        assert_eq!(notifier.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn concurrent_runs_send_each_reminder_once() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        insert_task(&ctx, &user, NOW + 12 * HOUR).await;

        let (first, second) = futures::join!(run(&ctx, NOW), run(&ctx, NOW));
        assert_eq!(first.unwrap().sent + second.unwrap().sent, 1);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn sends_every_threshold_as_deadline_approaches() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let task = insert_task(&ctx, &user, NOW + 24 * HOUR).await;

        for hours_passed in 0..24 {
            run(&ctx, NOW + hours_passed * HOUR).await.unwrap();
        }
        assert_eq!(notifier.sent().len(), 3);

        let task = ctx.repos.tasks.find(&task.id).await.unwrap();
        assert!(task.reminder_24h_sent && task.reminder_12h_sent && task.reminder_2h_sent);
        assert_eq!(task.last_reminder_sent_at, Some(NOW + 22 * HOUR));
    }

    #[actix_web::main]
    #[test]
    async fn failed_delivery_does_not_stop_other_reminders() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let broken = insert_user(&ctx, "broken_user", "broken@example.com").await;
        notifier.fail_for("broken@example.com");
        let failing = insert_task(&ctx, &broken, NOW + 12 * HOUR).await;
        let delivered = insert_task(&ctx, &user, NOW + 12 * HOUR).await;

        let res = run(&ctx, NOW).await.unwrap();
        assert_eq!(res, UseCaseRes { sent: 1, failed: 1 });

        let delivered = ctx.repos.tasks.find(&delivered.id).await.unwrap();
        assert!(delivered.reminder_12h_sent);
        assert_eq!(delivered.last_reminder_sent_at, Some(NOW));

        // The flag stays set so the reminder is not retried
        let failing = ctx.repos.tasks.find(&failing.id).await.unwrap();
        assert!(failing.reminder_12h_sent);
        assert_eq!(failing.last_reminder_sent_at, None);
        assert_eq!(run(&ctx, NOW).await.unwrap(), UseCaseRes { sent: 0, failed: 0 });
    }

    #[actix_web::main]
    #[test]
    async fn ignores_completed_and_past_deadline_tasks() {
        let TestContext {
            ctx,
            notifier,
            user,
        } = setup().await;
        let mut completed = insert_task(&ctx, &user, NOW + 2 * HOUR).await;
        completed.complete(NOW - HOUR);
        ctx.repos.tasks.save(&completed).await.unwrap();
        insert_task(&ctx, &user, NOW).await;
        insert_task(&ctx, &user, NOW - 2 * HOUR).await;

        assert_eq!(run(&ctx, NOW).await.unwrap(), UseCaseRes { sent: 0, failed: 0 });
        assert!(notifier.sent().is_empty());
    }

    /// Delegates to the in-memory repo but is unable to persist reminder state
    struct FailingTaskRepo {
        inner: InMemoryTaskRepo,
    }

    #[async_trait::async_trait]
    impl ITaskRepo for FailingTaskRepo {
        async fn insert(&self, task: &Task) -> anyhow::Result<()> {
            self.inner.insert(task).await
        }
        async fn save(&self, task: &Task) -> anyhow::Result<()> {
            self.inner.save(task).await
        }
        async fn find(&self, task_id: &ID) -> Option<Task> {
            self.inner.find(task_id).await
        }
        async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Task>> {
            self.inner.find_by_user(user_id).await
        }
        async fn delete(&self, task_id: &ID) -> Option<Task> {
            self.inner.delete(task_id).await
        }
        async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
            self.inner.delete_by_user(user_id).await
        }
        async fn find_reminder_candidates(
            &self,
            now: i64,
        ) -> anyhow::Result<Vec<TaskReminderCandidate>> {
            self.inner.find_reminder_candidates(now).await
        }
        async fn save_reminder_state(&self, _tasks: &[Task]) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("Connection reset"))
        }
    }

    #[actix_web::main]
    #[test]
    async fn fails_when_reminder_state_can_not_be_saved() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let users = Arc::new(InMemoryUserRepo::new());
        let mut ctx = TaskGuideContext::create_inmemory();
        ctx.notifier = notifier.clone();
        ctx.repos.users = users.clone();
        ctx.repos.tasks = Arc::new(FailingTaskRepo {
            inner: InMemoryTaskRepo::new(users),
        });
        let user = insert_user(&ctx, "johnny_b", "johnny@example.com").await;
        let task = insert_task(&ctx, &user, NOW + 2 * HOUR).await;

        assert!(matches!(
            run(&ctx, NOW).await,
            Err(UseCaseError::StorageError)
        ));
        assert!(!ctx.repos.tasks.find(&task.id).await.unwrap().reminder_2h_sent);
    }
}
