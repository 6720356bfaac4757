use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 机构状态
    #[ts(export, export_to = "../frontend/src/types/generated/institute.ts")]
    InstituteStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/institute.ts")]
pub struct Institute {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: InstituteStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
