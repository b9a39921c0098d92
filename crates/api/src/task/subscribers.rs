use super::create_task::{CreateTaskUseCase, UseCaseRes};
use crate::shared::usecase::Subscriber;
use chrono::{TimeZone, Utc};
use taskguide_domain::{escape_html, Task};
use taskguide_infra::TaskGuideContext;
use tracing::warn;

const TASK_CREATED_SUBJECT: &str = "New task created";

fn format_deadline(deadline: i64) -> String {
    match Utc.timestamp_millis_opt(deadline).single() {
        Some(deadline) => deadline.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => deadline.to_string(),
    }
}

fn task_created_email_body(task: &Task) -> String {
    let file = match &task.file_url {
        Some(url) => format!(
            "<p><strong>File:</strong> <a href='{}'>Open</a></p>",
            escape_html(url)
        ),
        None => String::new(),
    };
    format!(
        "<h2>New task: <strong>{}</strong></h2>\
         <p><strong>Description:</strong> {}</p>\
         <p><strong>Deadline:</strong> {}</p>{}",
        escape_html(&task.title),
        escape_html(&task.description),
        format_deadline(task.deadline),
        file
    )
}

pub struct SendEmailOnTaskCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateTaskUseCase> for SendEmailOnTaskCreated {
    async fn notify(&self, e: &UseCaseRes, ctx: &TaskGuideContext) {
        let sent = ctx
            .notifier
            .send(
                &e.owner.email,
                &e.owner.username,
                TASK_CREATED_SUBJECT,
                &task_created_email_body(&e.task),
            )
            .await;

        // Sideeffect, the task is created either way
        if !sent {
            warn!("Unable to send the task created email for task: {}", e.task.id);
        }
    }
}
