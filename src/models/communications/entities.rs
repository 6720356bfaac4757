use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 通讯类型
    #[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
    CommunicationKind {
        PaymentReminder => "payment_reminder",
        Manual => "manual",
    }
}

string_enum! {
    /// 实际尝试的发送渠道
    #[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
    CommunicationChannel {
        Email => "email",
        Sms => "sms",
        Both => "both",
        NoChannel => "none",
    }
}

impl CommunicationChannel {
    /// 根据是否尝试了邮件 / 短信得出渠道
    pub fn from_attempts(email: bool, sms: bool) -> Self {
        match (email, sms) {
            (true, true) => CommunicationChannel::Both,
            (true, false) => CommunicationChannel::Email,
            (false, true) => CommunicationChannel::Sms,
            (false, false) => CommunicationChannel::NoChannel,
        }
    }
}

string_enum! {
    /// 发送结果
    #[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
    CommunicationStatus {
        Sent => "sent",
        Failed => "failed",
        Skipped => "skipped",
    }
}

impl CommunicationStatus {
    /// attempted 为尝试次数，succeeded 为成功次数
    pub fn from_outcome(attempted: usize, succeeded: usize) -> Self {
        if attempted == 0 {
            CommunicationStatus::Skipped
        } else if succeeded > 0 {
            CommunicationStatus::Sent
        } else {
            CommunicationStatus::Failed
        }
    }
}

// 通讯记录（只追加）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
pub struct CommunicationLog {
    pub id: i64,
    pub student_id: Option<i64>,
    pub payment_id: Option<i64>,
    pub kind: CommunicationKind,
    pub channel: CommunicationChannel,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: CommunicationStatus,
    pub error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 写入通讯记录所需字段
#[derive(Debug, Clone)]
pub struct NewCommunicationLog {
    pub student_id: Option<i64>,
    pub payment_id: Option<i64>,
    pub kind: CommunicationKind,
    pub channel: CommunicationChannel,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: CommunicationStatus,
    pub error: Option<String>,
}

// 一次提醒批处理的汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
pub struct ReminderSummary {
    pub emails_sent: u64,
    pub sms_sent: u64,
    pub payments_processed: u64,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_attempts() {
        assert_eq!(
            CommunicationChannel::from_attempts(true, true),
            CommunicationChannel::Both
        );
        assert_eq!(
            CommunicationChannel::from_attempts(true, false),
            CommunicationChannel::Email
        );
        assert_eq!(
            CommunicationChannel::from_attempts(false, true),
            CommunicationChannel::Sms
        );
        assert_eq!(
            CommunicationChannel::from_attempts(false, false).as_str(),
            "none"
        );
    }

    #[test]
    fn test_status_from_outcome() {
        assert_eq!(
            CommunicationStatus::from_outcome(0, 0),
            CommunicationStatus::Skipped
        );
        assert_eq!(
            CommunicationStatus::from_outcome(2, 1),
            CommunicationStatus::Sent
        );
        assert_eq!(
            CommunicationStatus::from_outcome(1, 0),
            CommunicationStatus::Failed
        );
    }

    #[test]
    fn test_channel_serializes_as_stored_value() {
        let json = serde_json::to_string(&CommunicationChannel::NoChannel).unwrap();
        assert_eq!(json, "\"none\"");
        let parsed: CommunicationChannel = serde_json::from_str("\"both\"").unwrap();
        assert_eq!(parsed, CommunicationChannel::Both);
    }
}
