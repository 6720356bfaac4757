use super::entities::{CommunicationChannel, CommunicationKind};
use crate::models::common::{PaginationQuery, deserialize_optional_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 通讯记录查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
pub struct CommunicationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub student_id: Option<i64>,
    pub kind: Option<CommunicationKind>,
    pub channel: Option<CommunicationChannel>,
}

// 手动发送消息给学生（或其监护人）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/communication.ts")]
pub struct SendCommunicationRequest {
    pub student_id: i64,
    // email / sms / both
    pub channel: CommunicationChannel,
    pub subject: Option<String>,
    pub message: String,
}
