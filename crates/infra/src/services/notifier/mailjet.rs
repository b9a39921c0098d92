use super::INotifier;
use crate::config::MailjetConfig;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

const MAILJET_SEND_URL: &str = "https://api.mailjet.com/v3.1/send";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetContact<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetMessage<'a> {
    from: MailjetContact<'a>,
    to: Vec<MailjetContact<'a>>,
    subject: &'a str,
    #[serde(rename = "HTMLPart")]
    html_part: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetSendRequest<'a> {
    messages: Vec<MailjetMessage<'a>>,
}

/// Sends emails through the Mailjet v3.1 send api
pub struct MailjetNotifier {
    client: Client,
    config: MailjetConfig,
}

impl MailjetNotifier {
    pub fn new(config: MailjetConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for MailjetNotifier {
    async fn send(&self, to_email: &str, to_name: &str, subject: &str, html_body: &str) -> bool {
        let body = MailjetSendRequest {
            messages: vec![MailjetMessage {
                from: MailjetContact {
                    email: &self.config.sender_email,
                    name: &self.config.sender_name,
                },
                to: vec![MailjetContact {
                    email: to_email,
                    name: to_name,
                }],
                subject,
                html_part: html_body,
            }],
        };

        match self
            .client
            .post(MAILJET_SEND_URL)
            .basic_auth(&self.config.api_key, Some(&self.config.secret_key))
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                let status = res.status();
                let message = res.text().await.unwrap_or_default();
                error!(
                    "[Unexpected Response] Mailjet API send error. Status: {}. Error message: {}",
                    status, message
                );
                false
            }
            Err(e) => {
                error!(
                    "[Network Error] Mailjet API send error. Error message: {:?}",
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_send_request() {
        let body = MailjetSendRequest {
            messages: vec![MailjetMessage {
                from: MailjetContact {
                    email: "noreply@taskguide.app",
                    name: "TaskGuide",
                },
                to: vec![MailjetContact {
                    email: "johnny@example.com",
                    name: "johnny_b",
                }],
                subject: "Task deadline reminder",
                html_part: "<p>Hi</p>",
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Messages": [{
                    "From": { "Email": "noreply@taskguide.app", "Name": "TaskGuide" },
                    "To": [{ "Email": "johnny@example.com", "Name": "johnny_b" }],
                    "Subject": "Task deadline reminder",
                    "HTMLPart": "<p>Hi</p>"
                }]
            })
        );
    }
}
