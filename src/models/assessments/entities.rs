use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 测评类型
    #[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
    AssessmentKind {
        Exam => "exam",
        Quiz => "quiz",
        Assignment => "assignment",
        Project => "project",
    }
}

// 测评
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub class_id: i64,
    pub title: String,
    pub kind: AssessmentKind,
    pub max_score: f64,
    pub assessment_date: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Grade {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub remarks: Option<String>,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
