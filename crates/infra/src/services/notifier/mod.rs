mod inmemory;
mod mailjet;

pub use inmemory::{InMemoryNotifier, SentMessage};
pub use mailjet::MailjetNotifier;
use tracing::warn;

/// Delivers html emails to `User`s
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    /// Returns whether the message was accepted for delivery. Delivery
    /// problems are logged by the implementation and never returned as errors.
    async fn send(&self, to_email: &str, to_name: &str, subject: &str, html_body: &str) -> bool;
}

/// Used when no email provider is configured
pub struct DisabledNotifier {}

#[async_trait::async_trait]
impl INotifier for DisabledNotifier {
    async fn send(&self, _to_email: &str, _to_name: &str, subject: &str, _html_body: &str) -> bool {
        warn!("Email provider is not configured. Unable to send: {}", subject);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_notifier_never_delivers() {
        let notifier = DisabledNotifier {};
        assert!(
            !notifier
                .send("johnny@example.com", "johnny_b", "Subject", "<p>Body</p>")
                .await
        );
    }
}
