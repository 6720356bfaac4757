//! 课时存储操作

use super::SeaOrmStorage;
use crate::entity::class_sessions::{ActiveModel, Column, Entity as ClassSessions};
use crate::errors::{EduDeskError, Result};
use crate::models::sessions::{
    entities::ClassSession,
    requests::{CreateSessionRequest, SessionListQuery},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_class_sessions_impl(
        &self,
        class_id: i64,
        query: SessionListQuery,
    ) -> Result<Vec<ClassSession>> {
        let mut select = ClassSessions::find().filter(Column::ClassId.eq(class_id));

        if let Some(from) = query.from {
            select = select.filter(Column::SessionDate.gte(from));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::SessionDate.lte(to));
        }

        let sessions = select
            .order_by_asc(Column::SessionDate)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(sessions.into_iter().map(|m| m.into_session()).collect())
    }

    pub async fn create_class_session_impl(
        &self,
        class_id: i64,
        req: CreateSessionRequest,
    ) -> Result<ClassSession> {
        let model = ActiveModel {
            class_id: Set(class_id),
            title: Set(req.title),
            session_date: Set(req.session_date),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            location: Set(req.location),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_session())
    }

    pub async fn delete_class_session_impl(&self, id: i64) -> Result<bool> {
        let result = ClassSessions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("删除课时失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
