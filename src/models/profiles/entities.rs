use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 用户角色
    #[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
    UserRole {
        Admin => "admin",
        Staff => "staff",
        Teacher => "teacher",
        Student => "student",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    // 教务人员：可以管理学生、班级与学费
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Staff]
    }
    // 教学人员：可以记录考勤、成绩与教程
    pub fn academic_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Staff, &Self::Teacher]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Staff, &Self::Teacher, &Self::Student]
    }
}

// 用户档案（认证由外部服务完成，auth_user_id 对应令牌中的 sub）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct Profile {
    pub id: i64,
    pub auth_user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub institute_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 角色变更审计记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct RoleAudit {
    pub id: i64,
    pub profile_id: i64,
    pub old_role: UserRole,
    pub new_role: UserRole,
    pub changed_by: i64,
    pub reason: Option<String>,
    pub ip_address: Option<String>,
    pub changed_at: chrono::DateTime<chrono::Utc>,
}
