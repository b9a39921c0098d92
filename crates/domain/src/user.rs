use crate::shared::entity::{Entity, ID};
use thiserror::Error;

const USERNAME_MIN_LEN: usize = 6;
const USERNAME_MAX_LEN: usize = 30;

/// A `User` owns `Task`s and receives their deadline reminders by email
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub created: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum UserValidationError {
    #[error("Username must be {min} to {max} symbols")]
    InvalidUsername { min: usize, max: usize },
    #[error("Enter valid email address, got: `{0}`")]
    InvalidEmail(String),
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl User {
    pub fn new(username: String, email: String, now: i64) -> Result<Self, UserValidationError> {
        let username = username.trim().to_string();
        let username_len = username.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username_len) {
            return Err(UserValidationError::InvalidUsername {
                min: USERNAME_MIN_LEN,
                max: USERNAME_MAX_LEN,
            });
        }

        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(UserValidationError::InvalidEmail(email));
        }

        Ok(Self {
            id: Default::default(),
            username,
            email,
            created: now,
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
