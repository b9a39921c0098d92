mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailjetConfig};
pub use repos::{
    DeleteResult, ITaskRepo, IUserRepo, InMemoryTaskRepo, InMemoryUserRepo, Repos,
};
pub use services::*;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct TaskGuideContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
    /// Held for the whole duration of a reminder run so that the
    /// scheduled job and manual triggers never interleave
    pub reminder_lock: Arc<Mutex<()>>,
}

impl TaskGuideContext {
    async fn create(pool: PgPool) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(pool).await?;
        let config = Config::new();
        let notifier = create_notifier(&config);
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            reminder_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Context where everything is kept in memory. Emails are recorded
    /// instead of delivered.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryNotifier::new()),
            reminder_lock: Arc::new(Mutex::new(())),
        }
    }
}

fn create_notifier(config: &Config) -> Arc<dyn INotifier> {
    match &config.mailjet {
        Some(mailjet) => {
            info!("Emails will be delivered with Mailjet");
            Arc::new(MailjetNotifier::new(mailjet.clone()))
        }
        None => Arc::new(DisabledNotifier {}),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<TaskGuideContext> {
    let pool = connect().await?;
    TaskGuideContext::create(pool).await
}

fn get_psql_connection_string() -> anyhow::Result<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .map_err(|_| anyhow::anyhow!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

async fn connect() -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string()?)
        .await?;
    Ok(pool)
}

pub async fn run_migration() -> anyhow::Result<()> {
    let pool = connect().await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(())
}
