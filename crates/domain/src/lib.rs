mod calendar_feed;
mod reminder;
mod shared;
mod statistics;
mod task;
mod user;

pub use calendar_feed::TaskCalendarEntry;
pub use reminder::{
    hours_left, ReminderEmail, ReminderThreshold, TaskReminderCandidate,
    REMINDER_TOLERANCE_MILLIS,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::html::escape_html;
pub use statistics::{Statistics, StatusBreakdown, TaskStatusCounts};
pub use task::{Task, TaskValidationError};
pub use user::{User, UserValidationError};
