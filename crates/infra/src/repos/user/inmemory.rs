use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use taskguide_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        if !find_by(&self.users, |u| u.email == user.email).is_empty() {
            return Err(anyhow::anyhow!(
                "A user with email: {} already exists",
                user.email
            ));
        }
        insert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        find_by(&self.users, |u| u.email == email).into_iter().next()
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        delete(user_id, &self.users)
    }
}
