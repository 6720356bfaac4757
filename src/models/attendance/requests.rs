use super::entities::AttendanceStatus;
use crate::models::common::deserialize_optional_string_to_i64;
use serde::Deserialize;
use ts_rs::TS;

// 按班级和日期查询考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub class_id: Option<i64>,
    pub date: Option<chrono::NaiveDate>,
}

// 单个学生的考勤条目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

// 批量登记考勤（同一学生同一天重复登记时覆盖）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub class_id: i64,
    pub session_id: Option<i64>,
    pub attendance_date: chrono::NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}
