use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 学生状态
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    StudentStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
        Graduated => "graduated",
    }
}

// 监护人信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct GuardianContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// 学生实体
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub institute_id: Option<i64>,
    pub student_code: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guardian: GuardianContact,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub status: StudentStatus,
    pub barcode: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl Student {
    /// 通知邮箱：优先监护人
    pub fn email_recipient(&self) -> Option<&str> {
        non_blank(&self.guardian.email).or_else(|| non_blank(&self.email))
    }

    /// 通知手机：优先监护人
    pub fn phone_recipient(&self) -> Option<&str> {
        non_blank(&self.guardian.phone).or_else(|| non_blank(&self.phone))
    }
}
