use super::entities::ClassStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub institute_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub teacher_id: Option<i64>,
    pub status: Option<ClassStatus>,
    pub search: Option<String>,
}

// 创建班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub institute_id: Option<i64>,
    pub code: String,
    pub name: String,
    pub subject: Option<String>,
    pub teacher_id: Option<i64>,
    pub monthly_fee: f64,
    pub capacity: Option<i32>,
}

// 更新班级请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub teacher_id: Option<i64>,
    pub monthly_fee: Option<f64>,
    pub capacity: Option<i32>,
    pub status: Option<ClassStatus>,
}
