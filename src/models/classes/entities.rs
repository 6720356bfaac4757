use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 班级状态
    #[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
    ClassStatus {
        Active => "active",
        Inactive => "inactive",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: i64,
    pub institute_id: Option<i64>,
    // 班级编号
    pub code: String,
    // 班级名称
    pub name: String,
    pub subject: Option<String>,
    // 任课教师（可为空）
    pub teacher_id: Option<i64>,
    // 月学费
    pub monthly_fee: f64,
    // 容量
    pub capacity: Option<i32>,
    pub status: ClassStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
