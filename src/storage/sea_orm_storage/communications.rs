//! 通讯记录存储操作

use super::SeaOrmStorage;
use crate::entity::communication_logs::{ActiveModel, Column, Entity as CommunicationLogs};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    communications::{
        entities::{CommunicationLog, NewCommunicationLog},
        requests::CommunicationListQuery,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 写入通讯记录
    pub async fn create_communication_log_impl(
        &self,
        log: NewCommunicationLog,
    ) -> Result<CommunicationLog> {
        let model = ActiveModel {
            student_id: Set(log.student_id),
            payment_id: Set(log.payment_id),
            kind: Set(log.kind.to_string()),
            channel: Set(log.channel.to_string()),
            recipient_email: Set(log.recipient_email),
            recipient_phone: Set(log.recipient_phone),
            subject: Set(log.subject),
            message: Set(log.message),
            status: Set(log.status.to_string()),
            error: Set(log.error),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("写入通讯记录失败: {e}")))?;

        Ok(result.into_communication_log())
    }

    /// 分页列出通讯记录
    pub async fn list_communication_logs_with_pagination_impl(
        &self,
        query: CommunicationListQuery,
    ) -> Result<PaginatedResponse<CommunicationLog>> {
        let (page, size) = query.pagination.normalized();

        let mut select = CommunicationLogs::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }
        if let Some(channel) = query.channel {
            select = select.filter(Column::Channel.eq(channel.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询通讯记录总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询通讯记录页数失败: {e}")))?;
        let logs = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询通讯记录失败: {e}")))?;

        Ok(PaginatedResponse {
            items: logs
                .into_iter()
                .map(|m| m.into_communication_log())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
