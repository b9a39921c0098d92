mod base;
mod reminder;
mod status;
mod task;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;
use task::TaskClient;
pub use task::{CreateTaskInput, GetTasksInput, UpdateTaskInput};
pub use taskguide_api_structs::dtos::*;
pub use taskguide_api_structs::get_tasks::TaskSortOrder;
pub use taskguide_domain::ID;
use user::UserClient;
pub use user::CreateUserInput;

// Domain
pub use taskguide_api_structs::dtos::StatisticsDTO as Statistics;
pub use taskguide_api_structs::dtos::TaskCalendarEntryDTO as TaskCalendarEntry;
pub use taskguide_api_structs::dtos::TaskDTO as Task;
pub use taskguide_api_structs::dtos::UserDTO as User;

/// TaskGuide Server SDK
///
/// The SDK contains methods for interacting with the TaskGuide server
/// API.
#[derive(Clone)]
pub struct TaskGuideSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub task: TaskClient,
    pub user: UserClient,
}

impl TaskGuideSDK {
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// Sdk that is also allowed to trigger the sending of reminders
    pub fn with_reminder_key<T: Into<String>>(address: String, reminder_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_reminder_key(reminder_key.into());
        Self::create(base)
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);

        Self {
            reminder: ReminderClient::new(base.clone()),
            status: StatusClient::new(base.clone()),
            task: TaskClient::new(base.clone()),
            user: UserClient::new(base),
        }
    }
}
