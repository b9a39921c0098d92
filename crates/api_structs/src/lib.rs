mod reminder;
mod statistics;
mod status;
mod task;
mod user;

pub mod dtos {
    pub use crate::statistics::dtos::*;
    pub use crate::task::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::statistics::api::*;
pub use crate::status::api::*;
pub use crate::task::api::*;
pub use crate::user::api::*;
