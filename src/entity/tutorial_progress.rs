//! 学习进度实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tutorial_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tutorial_id: i64,
    pub student_id: i64,
    pub progress_percent: i32,
    pub completed_at: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tutorials::Entity",
        from = "Column::TutorialId",
        to = "super::tutorials::Column::Id"
    )]
    Tutorial,
}

impl Related<super::tutorials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutorial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_progress(self) -> crate::models::tutorials::entities::TutorialProgress {
        use crate::models::tutorials::entities::TutorialProgress;
        use chrono::{DateTime, Utc};

        TutorialProgress {
            id: self.id,
            tutorial_id: self.tutorial_id,
            student_id: self.student_id,
            progress_percent: self.progress_percent,
            completed_at: self
                .completed_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
