use super::entities::UserRole;
use crate::models::common::{PaginationQuery, deserialize_optional_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 档案列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 创建档案（启动时初始化管理员使用）
#[derive(Debug, Clone)]
pub struct CreateProfileRequest {
    pub auth_user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub institute_id: Option<i64>,
}

// 变更角色请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct UpdateRoleRequest {
    pub role: UserRole,
    pub reason: Option<String>,
}

// 角色审计查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct RoleAuditQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub profile_id: Option<i64>,
}
