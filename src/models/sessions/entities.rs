use serde::Serialize;
use ts_rs::TS;

// 课时（一次上课安排）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/session.ts")]
pub struct ClassSession {
    pub id: i64,
    pub class_id: i64,
    pub title: Option<String>,
    pub session_date: chrono::NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
