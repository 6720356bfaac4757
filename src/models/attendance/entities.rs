use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 考勤状态
    #[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
    AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub session_id: Option<i64>,
    pub attendance_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}
