use super::INotifier;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
}

/// Keeps every delivered message in memory. Delivery can be made to fail
/// for specific recipients.
pub struct InMemoryNotifier {
    sent: Mutex<Vec<SentMessage>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, email: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(email.to_string());
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_with_subject(&self, subject: &str) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.subject == subject)
            .collect()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn send(&self, to_email: &str, to_name: &str, subject: &str, html_body: &str) -> bool {
        if self
            .failing_recipients
            .lock()
            .unwrap()
            .iter()
            .any(|email| email == to_email)
        {
            return false;
        }
        self.sent.lock().unwrap().push(SentMessage {
            to_email: to_email.to_string(),
            to_name: to_name.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        true
    }
}
