mod shared;
mod task;
mod user;

use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

pub use shared::repo::DeleteResult;
pub use task::{ITaskRepo, InMemoryTaskRepo, PostgresTaskRepo};
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub tasks: Arc<dyn ITaskRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(pool: PgPool) -> anyhow::Result<Self> {
        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let users = Arc::new(InMemoryUserRepo::new());
        Self {
            tasks: Arc::new(InMemoryTaskRepo::new(users.clone())),
            users,
        }
    }
}
