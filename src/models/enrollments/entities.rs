use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 选课状态，仅 active 的选课参与月度计费
    #[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
    EnrollmentStatus {
        Active => "active",
        Inactive => "inactive",
        Completed => "completed",
        Dropped => "dropped",
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub status: EnrollmentStatus,
    // 覆盖班级月学费（为空时使用班级学费）
    pub custom_fee: Option<f64>,
    pub enrolled_at: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
