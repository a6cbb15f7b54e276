use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::employee::EmployeeRow;
use crate::notify::template::{build_email_template, NOTIFICATION_SUBJECT};
use crate::notify::EmployeeNotifier;

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const FROM_EMAIL: &str = "noreply@ghostwriter-workflow.com";
const FROM_NAME: &str = "Ghostwriter Content Team";

// ────────────────────────────────────────────────────────────────────────────
// SendGrid v3 mail/send payload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    subject: &'a str,
    content: Vec<EmailContent<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
}

#[derive(Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct EmailContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Backends
// ────────────────────────────────────────────────────────────────────────────

pub struct SendGridNotifier {
    http: Client,
    api_key: String,
}

impl SendGridNotifier {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl EmployeeNotifier for SendGridNotifier {
    async fn notify(&self, employee: &EmployeeRow, doc_url: &str) -> bool {
        let html = build_email_template(&employee.name, doc_url);
        let body = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: &employee.email,
                    name: None,
                }],
            }],
            from: EmailAddress {
                email: FROM_EMAIL,
                name: Some(FROM_NAME),
            },
            subject: NOTIFICATION_SUBJECT,
            content: vec![EmailContent {
                content_type: "text/html",
                value: &html,
            }],
        };

        let response = self
            .http
            .post(SENDGRID_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => {
                info!("Notified {} about {doc_url}", employee.email);
                true
            }
            Ok(r) => {
                let status = r.status();
                let body = r.text().await.unwrap_or_default();
                warn!("SendGrid rejected notification (status {status}): {body}");
                false
            }
            Err(e) => {
                warn!("SendGrid request failed: {e}");
                false
            }
        }
    }
}

/// Development backend when no SendGrid key is configured: logs what would
/// have been sent and reports success so the workflow can complete.
pub struct LogOnlyNotifier;

#[async_trait]
impl EmployeeNotifier for LogOnlyNotifier {
    async fn notify(&self, employee: &EmployeeRow, doc_url: &str) -> bool {
        info!(
            "Email notification (log-only): to={} subject={NOTIFICATION_SUBJECT:?} doc_url={doc_url}",
            employee.email
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn employee() -> EmployeeRow {
        EmployeeRow {
            id: Uuid::new_v4(),
            name: "Anna Muster".to_string(),
            email: "anna@example.ch".to_string(),
            linkedin_profile: String::new(),
            google_drive_folder_id: String::new(),
            tone_description: String::new(),
            sample_texts_key: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_mail_request_serializes_to_sendgrid_schema() {
        let body = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: "anna@example.ch",
                    name: None,
                }],
            }],
            from: EmailAddress {
                email: FROM_EMAIL,
                name: Some(FROM_NAME),
            },
            subject: NOTIFICATION_SUBJECT,
            content: vec![EmailContent {
                content_type: "text/html",
                value: "<p>Hallo</p>",
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "personalizations": [{"to": [{"email": "anna@example.ch"}]}],
                "from": {"email": FROM_EMAIL, "name": FROM_NAME},
                "subject": NOTIFICATION_SUBJECT,
                "content": [{"type": "text/html", "value": "<p>Hallo</p>"}]
            })
        );
    }

    #[tokio::test]
    async fn test_log_only_notifier_reports_success_without_sending() {
        assert!(LogOnlyNotifier.notify(&employee(), "https://example.com").await);
    }
}
