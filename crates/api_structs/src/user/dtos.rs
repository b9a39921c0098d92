use serde::{Deserialize, Serialize};
use taskguide_domain::{User, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub created: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created: user.created,
        }
    }
}
