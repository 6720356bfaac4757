//! 用户档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub auth_user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub institute_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_audits::Entity")]
    RoleAudits,
}

impl Related<super::role_audits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleAudits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::profiles::entities::Profile {
        use crate::models::profiles::entities::{Profile, UserRole};
        use chrono::{DateTime, Utc};

        Profile {
            id: self.id,
            auth_user_id: self.auth_user_id,
            email: self.email,
            full_name: self.full_name,
            // 无法识别的角色按最低权限处理
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            institute_id: self.institute_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
