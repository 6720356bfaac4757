use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{EmailMessage, EmailProvider, http_client};
use crate::config::EmailConfig;
use crate::errors::{EduDeskError, Result};

/// Resend 兼容的邮件 HTTP 接口
pub struct ResendEmailProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl ResendEmailProvider {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.from_address.is_empty() {
            return Err(EduDeskError::configuration(
                "Email API key and from address are required",
            ));
        }
        Ok(Self {
            client: http_client()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailProvider for ResendEmailProvider {
    async fn send_email(&self, message: &EmailMessage) -> Result<()> {
        let body = SendEmailBody {
            from: &self.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduDeskError::notification(format!(
                "Email to {} rejected ({}): {}",
                message.to, status, detail
            )));
        }

        debug!("Email sent to {}", message.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_credentials() {
        let config = EmailConfig {
            api_key: String::new(),
            from_address: "billing@example.com".to_string(),
            api_url: "https://api.resend.com/emails".to_string(),
        };
        assert!(ResendEmailProvider::new(&config).is_err());
    }

    #[test]
    fn test_body_shape() {
        let body = SendEmailBody {
            from: "billing@example.com",
            to: ["parent@example.com"],
            subject: "Reminder",
            html: "<p>Hi</p>",
        };
        let json = serde_json::to_value(&body).expect("serializes");
        assert_eq!(json["to"], serde_json::json!(["parent@example.com"]));
        assert_eq!(json["from"], "billing@example.com");
    }
}
