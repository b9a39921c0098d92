use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use taskguide_domain::{User, ID};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    username: String,
    email: String,
    created: i64,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            username: raw.username,
            email: raw.email,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, username, email, created)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find user with id: {}. Error: {:?}", user_id, e))
        .ok()
        .flatten()
        .map(User::from)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to find user by email. Error: {:?}", e))
        .ok()
        .flatten()
        .map(User::from)
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| error!("Unable to delete user with id: {}. Error: {:?}", user_id, e))
        .ok()
        .flatten()
        .map(User::from)
    }
}
