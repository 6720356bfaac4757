//! 教程与学习进度存储操作

use super::SeaOrmStorage;
use crate::entity::tutorial_progress::{
    ActiveModel as ProgressActiveModel, Column as ProgressColumn, Entity as TutorialProgressEntity,
};
use crate::entity::tutorials::{ActiveModel, Column, Entity as Tutorials};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    tutorials::{
        entities::{Tutorial, TutorialProgress},
        requests::{
            CreateTutorialRequest, TutorialListQuery, UpdateTutorialRequest,
            UpsertProgressRequest,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_tutorial_impl(&self, req: CreateTutorialRequest) -> Result<Tutorial> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            title: Set(req.title),
            description: Set(req.description),
            content_url: Set(req.content_url),
            published: Set(req.published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("创建教程失败: {e}")))?;

        Ok(result.into_tutorial())
    }

    pub async fn get_tutorial_by_id_impl(&self, id: i64) -> Result<Option<Tutorial>> {
        let result = Tutorials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询教程失败: {e}")))?;

        Ok(result.map(|m| m.into_tutorial()))
    }

    pub async fn list_tutorials_with_pagination_impl(
        &self,
        query: TutorialListQuery,
    ) -> Result<PaginatedResponse<Tutorial>> {
        let (page, size) = query.pagination.normalized();

        let mut select = Tutorials::find();
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询教程总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询教程页数失败: {e}")))?;
        let tutorials = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询教程列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: tutorials.into_iter().map(|m| m.into_tutorial()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_tutorial_impl(
        &self,
        id: i64,
        update: UpdateTutorialRequest,
    ) -> Result<Option<Tutorial>> {
        if self.get_tutorial_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(content_url) = update.content_url {
            model.content_url = Set(Some(content_url));
        }
        if let Some(published) = update.published {
            model.published = Set(published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("更新教程失败: {e}")))?;

        self.get_tutorial_by_id_impl(id).await
    }

    /// 删除教程及其学习进度
    pub async fn delete_tutorial_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("开启事务失败: {e}")))?;

        TutorialProgressEntity::delete_many()
            .filter(ProgressColumn::TutorialId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("删除学习进度失败: {e}")))?;

        let result = Tutorials::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("删除教程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_tutorial_progress_impl(
        &self,
        tutorial_id: i64,
    ) -> Result<Vec<TutorialProgress>> {
        let progress = TutorialProgressEntity::find()
            .filter(ProgressColumn::TutorialId.eq(tutorial_id))
            .order_by_asc(ProgressColumn::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学习进度失败: {e}")))?;

        Ok(progress.into_iter().map(|m| m.into_progress()).collect())
    }

    /// 更新学习进度，达到 100% 时记录完成时间
    pub async fn upsert_tutorial_progress_impl(
        &self,
        tutorial_id: i64,
        req: UpsertProgressRequest,
    ) -> Result<TutorialProgress> {
        let now = chrono::Utc::now().timestamp();

        let existing = TutorialProgressEntity::find()
            .filter(ProgressColumn::TutorialId.eq(tutorial_id))
            .filter(ProgressColumn::StudentId.eq(req.student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学习进度失败: {e}")))?;

        let model = match existing {
            Some(progress) => {
                let completed_at = if req.progress_percent >= 100 {
                    progress.completed_at.or(Some(now))
                } else {
                    None
                };
                let mut model: ProgressActiveModel = progress.into();
                model.progress_percent = Set(req.progress_percent);
                model.completed_at = Set(completed_at);
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                ProgressActiveModel {
                    tutorial_id: Set(tutorial_id),
                    student_id: Set(req.student_id),
                    progress_percent: Set(req.progress_percent),
                    completed_at: Set((req.progress_percent >= 100).then_some(now)),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| EduDeskError::database_operation(format!("保存学习进度失败: {e}")))?;

        Ok(model.into_progress())
    }
}
