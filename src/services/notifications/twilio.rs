use async_trait::async_trait;
use tracing::debug;

use super::{SmsMessage, SmsProvider, http_client};
use crate::config::SmsConfig;
use crate::errors::{EduDeskError, Result};

/// Twilio 兼容的短信 REST 接口
pub struct TwilioSmsProvider {
    client: reqwest::Client,
    messages_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioSmsProvider {
    pub fn new(config: &SmsConfig) -> Result<Self> {
        if config.account_sid.is_empty()
            || config.auth_token.is_empty()
            || config.from_number.is_empty()
        {
            return Err(EduDeskError::configuration(
                "SMS account SID, auth token and from number are required",
            ));
        }
        Ok(Self {
            client: http_client()?,
            messages_url: messages_url(&config.api_base_url, &config.account_sid),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from: config.from_number.clone(),
        })
    }
}

fn messages_url(base: &str, account_sid: &str) -> String {
    format!(
        "{}/Accounts/{}/Messages.json",
        base.trim_end_matches('/'),
        account_sid
    )
}

#[async_trait]
impl SmsProvider for TwilioSmsProvider {
    async fn send_sms(&self, message: &SmsMessage) -> Result<()> {
        let params = [
            ("To", message.to.as_str()),
            ("From", self.from.as_str()),
            ("Body", message.body.as_str()),
        ];

        let response = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduDeskError::notification(format!(
                "SMS to {} rejected ({}): {}",
                message.to, status, detail
            )));
        }

        debug!("SMS sent to {}", message.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        assert_eq!(
            messages_url("https://api.twilio.com/2010-04-01/", "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_requires_credentials() {
        let config = SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: String::new(),
            from_number: "+15550000000".to_string(),
            api_base_url: "https://api.twilio.com/2010-04-01".to_string(),
        };
        assert!(TwilioSmsProvider::new(&config).is_err());
    }
}
