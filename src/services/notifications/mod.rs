//! 邮件与短信发送
//!
//! 发送通道以 trait 抽象，`Notifier` 持有已配置的通道；
//! 未配置的通道为 `None`，调用方据此跳过该渠道。

pub mod messages;
pub mod resend;
pub mod twilio;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::Result;

pub use resend::ResendEmailProvider;
pub use twilio::TwilioSmsProvider;

/// 待发送的邮件
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// 待发送的短信
#[derive(Debug, Clone)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<()>;
}

#[async_trait]
pub trait SmsProvider: Send + Sync {
    async fn send_sms(&self, message: &SmsMessage) -> Result<()>;
}

/// 已配置的发送通道
#[derive(Clone, Default)]
pub struct Notifier {
    pub email: Option<Arc<dyn EmailProvider>>,
    pub sms: Option<Arc<dyn SmsProvider>>,
}

impl Notifier {
    pub fn new(email: Option<Arc<dyn EmailProvider>>, sms: Option<Arc<dyn SmsProvider>>) -> Self {
        Self { email, sms }
    }

    /// 根据全局配置构建；凭据不完整的通道视为未启用
    pub fn from_config() -> Self {
        let config = AppConfig::get();

        let email: Option<Arc<dyn EmailProvider>> = if config.email_enabled() {
            match ResendEmailProvider::new(&config.email) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(e) => {
                    warn!("Email provider disabled: {}", e);
                    None
                }
            }
        } else {
            warn!("Email provider not configured, email channel disabled");
            None
        };

        let sms: Option<Arc<dyn SmsProvider>> = if config.sms_enabled() {
            match TwilioSmsProvider::new(&config.sms) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(e) => {
                    warn!("SMS provider disabled: {}", e);
                    None
                }
            }
        } else {
            warn!("SMS provider not configured, SMS channel disabled");
            None
        };

        Self { email, sms }
    }

    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    pub fn has_sms(&self) -> bool {
        self.sms.is_some()
    }
}

/// 外部请求的统一客户端
pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .build()
        .map_err(Into::into)
}

#[cfg(test)]
pub mod fakes {
    //! 测试用的内存发送通道

    use super::*;
    use crate::errors::EduDeskError;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingEmail {
        pub sent: Mutex<Vec<EmailMessage>>,
        pub fail: bool,
    }

    impl RecordingEmail {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn sent_to(&self) -> Vec<String> {
            self.sent
                .lock()
                .map(|sent| sent.iter().map(|m| m.to.clone()).collect())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl EmailProvider for RecordingEmail {
        async fn send_email(&self, message: &EmailMessage) -> Result<()> {
            if self.fail {
                return Err(EduDeskError::notification("email provider returned 500"));
            }
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(message.clone());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct RecordingSms {
        pub sent: Mutex<Vec<SmsMessage>>,
        pub fail: bool,
    }

    impl RecordingSms {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn sent_to(&self) -> Vec<String> {
            self.sent
                .lock()
                .map(|sent| sent.iter().map(|m| m.to.clone()).collect())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl SmsProvider for RecordingSms {
        async fn send_sms(&self, message: &SmsMessage) -> Result<()> {
            if self.fail {
                return Err(EduDeskError::notification("sms provider returned 400"));
            }
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(message.clone());
            }
            Ok(())
        }
    }
}
