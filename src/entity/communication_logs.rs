//! 通讯记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "communication_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: Option<i64>,
    pub payment_id: Option<i64>,
    pub kind: String,
    pub channel: String,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fee_payments::Entity",
        from = "Column::PaymentId",
        to = "super::fee_payments::Column::Id"
    )]
    FeePayment,
}

impl Related<super::fee_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeePayment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_communication_log(
        self,
    ) -> crate::models::communications::entities::CommunicationLog {
        use crate::models::communications::entities::{
            CommunicationChannel, CommunicationKind, CommunicationLog, CommunicationStatus,
        };
        use chrono::{DateTime, Utc};

        CommunicationLog {
            id: self.id,
            student_id: self.student_id,
            payment_id: self.payment_id,
            kind: self
                .kind
                .parse::<CommunicationKind>()
                .unwrap_or(CommunicationKind::Manual),
            channel: self
                .channel
                .parse::<CommunicationChannel>()
                .unwrap_or(CommunicationChannel::NoChannel),
            recipient_email: self.recipient_email,
            recipient_phone: self.recipient_phone,
            subject: self.subject,
            message: self.message,
            status: self
                .status
                .parse::<CommunicationStatus>()
                .unwrap_or(CommunicationStatus::Skipped),
            error: self.error,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
