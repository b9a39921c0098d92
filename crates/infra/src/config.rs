use taskguide_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_REMINDER_JOB_INTERVAL_SECS: u64 = 5 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to protect the endpoint for sending reminders on demand.
    /// Clients provide it in the `taskguide-reminder-key` header.
    pub reminder_trigger_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Whether the background job sending deadline reminders should run
    pub reminder_job_enabled: bool,
    /// Seconds between two runs of the reminder job
    pub reminder_job_interval_secs: u64,
    /// Credentials for delivering emails. Emails are not delivered without them.
    pub mailjet: Option<MailjetConfig>,
}

#[derive(Debug, Clone)]
pub struct MailjetConfig {
    pub api_key: String,
    pub secret_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

impl MailjetConfig {
    fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        match (
            var("MAILJET_API_KEY"),
            var("MAILJET_SECRET_KEY"),
            var("MAILJET_SENDER_EMAIL"),
        ) {
            (Some(api_key), Some(secret_key), Some(sender_email)) => Some(Self {
                api_key,
                secret_key,
                sender_email,
                sender_name: var("MAILJET_SENDER_NAME").unwrap_or_else(|| "TaskGuide".into()),
            }),
            _ => {
                warn!("Mailjet environment variables are not set. Emails will not be delivered.");
                None
            }
        }
    }
}

fn parse_env_or_default<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    parse_or_default(name, std::env::var(name).ok(), default, |_| true)
}

fn parse_or_default<T, F>(name: &str, value: Option<String>, default: T, is_valid: F) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    F: Fn(&T) -> bool,
{
    let value = match value {
        Some(value) => value,
        None => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) if is_valid(&parsed) => parsed,
        _ => {
            warn!(
                "The given {}: {} is not valid, falling back to the default value: {}.",
                name, value, default
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let reminder_trigger_secret = match std::env::var("REMINDER_TRIGGER_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find REMINDER_TRIGGER_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(16);
                info!(
                    "Secret for triggering reminders was generated and set to: {}",
                    secret
                );
                secret
            }
        };

        Self {
            reminder_trigger_secret,
            port: parse_env_or_default("PORT", 5000),
            reminder_job_enabled: parse_env_or_default("REMINDER_JOB_ENABLED", true),
            reminder_job_interval_secs: parse_or_default(
                "REMINDER_JOB_INTERVAL_SECS",
                std::env::var("REMINDER_JOB_INTERVAL_SECS").ok(),
                DEFAULT_REMINDER_JOB_INTERVAL_SECS,
                |secs| *secs > 0,
            ),
            mailjet: MailjetConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
