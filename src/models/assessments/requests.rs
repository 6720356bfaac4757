use super::entities::AssessmentKind;
use crate::models::common::{PaginationQuery, deserialize_optional_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 测评列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub class_id: Option<i64>,
    pub kind: Option<AssessmentKind>,
}

// 创建测评请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub class_id: i64,
    pub title: String,
    pub kind: AssessmentKind,
    pub max_score: f64,
    pub assessment_date: Option<chrono::NaiveDate>,
}

// 单个学生的成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct GradeEntry {
    pub student_id: i64,
    pub score: f64,
    pub remarks: Option<String>,
}

// 批量录入成绩（已存在则覆盖）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpsertGradesRequest {
    pub grades: Vec<GradeEntry>,
}
