use crate::models::common::{PaginationQuery, deserialize_optional_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 教程列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutorial.ts")]
pub struct TutorialListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub class_id: Option<i64>,
    pub search: Option<String>,
}

// 创建教程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutorial.ts")]
pub struct CreateTutorialRequest {
    pub class_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub content_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

// 更新教程请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutorial.ts")]
pub struct UpdateTutorialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub published: Option<bool>,
}

// 更新学习进度
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutorial.ts")]
pub struct UpsertProgressRequest {
    pub student_id: i64,
    pub progress_percent: i32,
}
