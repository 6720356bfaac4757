//! 角色变更审计实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "role_audits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub profile_id: i64,
    pub old_role: String,
    pub new_role: String,
    pub changed_by: i64,
    pub reason: Option<String>,
    pub ip_address: Option<String>,
    pub changed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id"
    )]
    Profile,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_role_audit(self) -> crate::models::profiles::entities::RoleAudit {
        use crate::models::profiles::entities::{RoleAudit, UserRole};
        use chrono::{DateTime, Utc};

        RoleAudit {
            id: self.id,
            profile_id: self.profile_id,
            old_role: self.old_role.parse::<UserRole>().unwrap_or(UserRole::Student),
            new_role: self.new_role.parse::<UserRole>().unwrap_or(UserRole::Student),
            changed_by: self.changed_by,
            reason: self.reason,
            ip_address: self.ip_address,
            changed_at: DateTime::<Utc>::from_timestamp(self.changed_at, 0).unwrap_or_default(),
        }
    }
}
