//! 用户档案存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::entity::role_audits::{
    ActiveModel as RoleAuditActiveModel, Column as RoleAuditColumn, Entity as RoleAudits,
};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    profiles::{
        entities::{Profile, RoleAudit, UserRole},
        requests::{CreateProfileRequest, ProfileListQuery, RoleAuditQuery},
    },
};
use crate::storage::RoleChange;
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建档案
    pub async fn create_profile_impl(&self, req: CreateProfileRequest) -> Result<Profile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            auth_user_id: Set(req.auth_user_id),
            email: Set(req.email),
            full_name: Set(req.full_name),
            role: Set(req.role.to_string()),
            institute_id: Set(req.institute_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("创建档案失败: {e}")))?;

        Ok(result.into_profile())
    }

    /// 通过 ID 获取档案
    pub async fn get_profile_by_id_impl(&self, id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询档案失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 通过外部认证用户 ID 获取档案
    pub async fn get_profile_by_auth_user_id_impl(
        &self,
        auth_user_id: &str,
    ) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(Column::AuthUserId.eq(auth_user_id))
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询档案失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 分页列出档案
    pub async fn list_profiles_with_pagination_impl(
        &self,
        query: ProfileListQuery,
    ) -> Result<PaginatedResponse<Profile>> {
        let (page, size) = query.pagination.normalized();

        let mut select = Profiles::find();

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 搜索邮箱或姓名
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Email.contains(&escaped))
                    .add(Column::FullName.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询档案总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询档案页数失败: {e}")))?;
        let profiles = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询档案列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: profiles.into_iter().map(|m| m.into_profile()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 统计某角色的档案数
    pub async fn count_profiles_by_role_impl(&self, role: UserRole) -> Result<u64> {
        Profiles::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("统计档案失败: {e}")))
    }

    /// 变更角色，同时写入审计记录
    pub async fn change_profile_role_impl(&self, change: RoleChange) -> Result<Option<Profile>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Profiles::find_by_id(change.profile_id)
            .one(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询档案失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let old_role = existing.role.clone();

        let mut model: ActiveModel = existing.into();
        model.role = Set(change.new_role.to_string());
        model.updated_at = Set(now);
        let updated = model
            .update(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("更新角色失败: {e}")))?;

        RoleAuditActiveModel {
            profile_id: Set(change.profile_id),
            old_role: Set(old_role),
            new_role: Set(change.new_role.to_string()),
            changed_by: Set(change.changed_by),
            reason: Set(change.reason),
            ip_address: Set(change.ip_address),
            changed_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EduDeskError::database_operation(format!("写入角色审计失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_profile()))
    }

    /// 分页列出角色审计记录
    pub async fn list_role_audits_with_pagination_impl(
        &self,
        query: RoleAuditQuery,
    ) -> Result<PaginatedResponse<RoleAudit>> {
        let (page, size) = query.pagination.normalized();

        let mut select = RoleAudits::find();
        if let Some(profile_id) = query.profile_id {
            select = select.filter(RoleAuditColumn::ProfileId.eq(profile_id));
        }

        let paginator = select
            .order_by_desc(RoleAuditColumn::ChangedAt)
            .order_by_desc(RoleAuditColumn::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询审计总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询审计页数失败: {e}")))?;
        let audits = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询审计列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: audits.into_iter().map(|m| m.into_role_audit()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
