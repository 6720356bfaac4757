use crate::models::communications::entities::ReminderSummary;
use serde::Serialize;

// 生成学费 / 标记逾期的响应
#[derive(Debug, Serialize)]
pub struct CronCountResponse {
    pub success: bool,
    pub message: String,
    pub count: u64,
}

impl CronCountResponse {
    pub fn new(message: impl Into<String>, count: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            count,
        }
    }
}

// 缴费提醒的响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRunResponse {
    pub success: bool,
    pub message: String,
    pub emails_sent: u64,
    pub sms_sent: u64,
    pub payments_processed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<ReminderSummary> for ReminderRunResponse {
    fn from(summary: ReminderSummary) -> Self {
        let message = format!(
            "Processed {} payments: {} emails, {} SMS sent",
            summary.payments_processed, summary.emails_sent, summary.sms_sent
        );
        Self {
            success: true,
            message,
            emails_sent: summary.emails_sent,
            sms_sent: summary.sms_sent,
            payments_processed: summary.payments_processed,
            errors: if summary.errors.is_empty() {
                None
            } else {
                Some(summary.errors)
            },
        }
    }
}

// 定时任务错误响应
#[derive(Debug, Serialize)]
pub struct CronErrorResponse {
    pub error: String,
}

impl CronErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_response_omits_empty_errors() {
        let response = ReminderRunResponse::from(ReminderSummary {
            emails_sent: 1,
            sms_sent: 0,
            payments_processed: 1,
            errors: vec![],
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["emailsSent"], 1);
        assert_eq!(json["smsSent"], 0);
        assert_eq!(json["paymentsProcessed"], 1);
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_reminder_response_keeps_errors() {
        let response = ReminderRunResponse::from(ReminderSummary {
            emails_sent: 0,
            sms_sent: 0,
            payments_processed: 1,
            errors: vec!["Email to a@b.c failed".to_string()],
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["errors"].as_array().map(|a| a.len()), Some(1));
    }
}
