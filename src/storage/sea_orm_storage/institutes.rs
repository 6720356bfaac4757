//! 机构存储操作

use super::SeaOrmStorage;
use crate::entity::institutes::{ActiveModel, Column, Entity as Institutes};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    institutes::{
        entities::{Institute, InstituteStatus},
        requests::{CreateInstituteRequest, InstituteListQuery, UpdateInstituteRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_institute_impl(&self, req: CreateInstituteRequest) -> Result<Institute> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            address: Set(req.address),
            phone: Set(req.phone),
            email: Set(req.email),
            status: Set(InstituteStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("创建机构失败: {e}")))?;

        Ok(result.into_institute())
    }

    pub async fn get_institute_by_id_impl(&self, id: i64) -> Result<Option<Institute>> {
        let result = Institutes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询机构失败: {e}")))?;

        Ok(result.map(|m| m.into_institute()))
    }

    pub async fn get_institute_by_code_impl(&self, code: &str) -> Result<Option<Institute>> {
        let result = Institutes::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询机构失败: {e}")))?;

        Ok(result.map(|m| m.into_institute()))
    }

    pub async fn list_institutes_with_pagination_impl(
        &self,
        query: InstituteListQuery,
    ) -> Result<PaginatedResponse<Institute>> {
        let (page, size) = query.pagination.normalized();

        let mut select = Institutes::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        let paginator = select.order_by_asc(Column::Name).paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询机构总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询机构页数失败: {e}")))?;
        let institutes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询机构列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: institutes.into_iter().map(|m| m.into_institute()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_institute_impl(
        &self,
        id: i64,
        update: UpdateInstituteRequest,
    ) -> Result<Option<Institute>> {
        if self.get_institute_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("更新机构失败: {e}")))?;

        self.get_institute_by_id_impl(id).await
    }
}
