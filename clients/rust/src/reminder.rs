use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use taskguide_api_structs::send_task_reminders;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Sends the deadline reminders that are due right now. Requires the
    /// reminder key to be set on the sdk.
    pub async fn send(&self) -> APIResponse<send_task_reminders::APIResponse> {
        self.base
            .post_without_body("reminders/send".into(), StatusCode::OK)
            .await
    }
}
