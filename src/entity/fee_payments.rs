//! 学费记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: i64,
    pub amount: f64,
    pub amount_paid: Option<f64>,
    pub payment_month: Date,
    pub due_date: Date,
    pub status: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_fee_payment(self) -> crate::models::payments::entities::FeePayment {
        use crate::models::payments::entities::{FeePayment, PaymentMethod, PaymentStatus};
        use chrono::{DateTime, Utc};

        FeePayment {
            id: self.id,
            student_id: self.student_id,
            enrollment_id: self.enrollment_id,
            amount: self.amount,
            amount_paid: self.amount_paid,
            payment_month: self.payment_month,
            due_date: self.due_date,
            status: self
                .status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Unpaid),
            payment_method: self
                .payment_method
                .and_then(|m| m.parse::<PaymentMethod>().ok()),
            transaction_id: self.transaction_id,
            payment_date: self.payment_date,
            notes: self.notes,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
