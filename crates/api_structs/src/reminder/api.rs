use serde::{Deserialize, Serialize};

pub mod send_task_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub sent: usize,
        pub failed: usize,
        pub message: String,
    }

    impl APIResponse {
        pub fn new(sent: usize, failed: usize) -> Self {
            Self {
                sent,
                failed,
                message: format!("Done. Sent {} reminders.", sent),
            }
        }
    }
}
