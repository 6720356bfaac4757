use serde::Serialize;
use ts_rs::TS;

// 教程
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutorial.ts")]
pub struct Tutorial {
    pub id: i64,
    pub class_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学习进度
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutorial.ts")]
pub struct TutorialProgress {
    pub id: i64,
    pub tutorial_id: i64,
    pub student_id: i64,
    pub progress_percent: i32,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
