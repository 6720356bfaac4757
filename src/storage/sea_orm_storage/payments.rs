//! 学费存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::fee_payments::{ActiveModel, Column, Entity as FeePayments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    payments::{
        entities::{FeePayment, FeePaymentDetail, PaymentStatus},
        requests::{CreatePaymentRequest, PaymentListQuery},
    },
};
use crate::storage::PaymentSettlement;
use crate::utils::dates::month_start;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 手动创建学费记录
    pub async fn create_payment_impl(&self, req: CreatePaymentRequest) -> Result<FeePayment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            enrollment_id: Set(req.enrollment_id),
            amount: Set(req.amount),
            amount_paid: Set(None),
            payment_month: Set(month_start(req.payment_month)),
            due_date: Set(req.due_date),
            status: Set(PaymentStatus::Unpaid.to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("创建学费记录失败: {e}")))?;

        Ok(result.into_fee_payment())
    }

    /// 通过 ID 获取学费记录
    pub async fn get_payment_by_id_impl(&self, id: i64) -> Result<Option<FeePayment>> {
        let result = FeePayments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学费记录失败: {e}")))?;

        Ok(result.map(|m| m.into_fee_payment()))
    }

    /// 分页列出学费记录，并补充学生与班级名称
    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<FeePaymentDetail>> {
        let (page, size) = query.pagination.normalized();

        let mut select = FeePayments::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(month) = query.month {
            select = select.filter(Column::PaymentMonth.eq(month_start(month)));
        }

        let paginator = select
            .order_by_desc(Column::PaymentMonth)
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学费总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学费页数失败: {e}")))?;
        let payments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学费列表失败: {e}")))?;

        // 批量加载关联的学生、选课与班级
        let student_ids: HashSet<i64> = payments.iter().map(|p| p.student_id).collect();
        let enrollment_ids: HashSet<i64> = payments.iter().map(|p| p.enrollment_id).collect();

        let student_names: HashMap<i64, String> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.full_name))
            .collect();

        let enrollment_classes: HashMap<i64, i64> = Enrollments::find()
            .filter(EnrollmentColumn::Id.is_in(enrollment_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询选课失败: {e}")))?
            .into_iter()
            .map(|e| (e.id, e.class_id))
            .collect();

        let class_ids: HashSet<i64> = enrollment_classes.values().copied().collect();
        let class_names: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let items = payments
            .into_iter()
            .map(|m| {
                let class_id = enrollment_classes.get(&m.enrollment_id).copied();
                FeePaymentDetail {
                    student_name: student_names.get(&m.student_id).cloned(),
                    class_id,
                    class_name: class_id.and_then(|id| class_names.get(&id).cloned()),
                    payment: m.into_fee_payment(),
                }
            })
            .collect();

        Ok(PaginatedResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 确认收款：实收金额等于应收金额
    ///
    /// 写入以当前状态为条件；记录已不处于可结清状态时返回 Conflict。
    pub async fn mark_payment_paid_impl(
        &self,
        id: i64,
        settlement: PaymentSettlement,
    ) -> Result<Option<FeePayment>> {
        if self.get_payment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let result = FeePayments::update_many()
            .col_expr(Column::Status, Expr::value(PaymentStatus::Paid.to_string()))
            .col_expr(Column::AmountPaid, Expr::col(Column::Amount))
            .col_expr(
                Column::PaymentMethod,
                Expr::value(Some(settlement.payment_method.to_string())),
            )
            .col_expr(Column::TransactionId, Expr::value(settlement.transaction_id))
            .col_expr(Column::PaymentDate, Expr::value(Some(settlement.payment_date)))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.is_in(status_strings(PaymentStatus::Paid)))
            .exec(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("更新学费记录失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(EduDeskError::conflict("Payment is already marked as paid"));
        }

        self.get_payment_by_id_impl(id).await
    }

    /// 手动更新状态
    ///
    /// 写入以当前状态为条件；状态已被其他请求改变时返回 Conflict。
    pub async fn update_payment_status_impl(
        &self,
        id: i64,
        status: PaymentStatus,
        amount_paid: Option<f64>,
        notes: Option<String>,
    ) -> Result<Option<FeePayment>> {
        if self.get_payment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut update = FeePayments::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()));
        if let Some(amount_paid) = amount_paid {
            update = update.col_expr(Column::AmountPaid, Expr::value(Some(amount_paid)));
        }
        if let Some(notes) = notes {
            update = update.col_expr(Column::Notes, Expr::value(Some(notes)));
        }

        let result = update
            .filter(Column::Id.eq(id))
            .filter(Column::Status.is_in(status_strings(status)))
            .exec(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("更新学费记录失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(EduDeskError::conflict(format!(
                "Payment can no longer be moved to {status}"
            )));
        }

        self.get_payment_by_id_impl(id).await
    }
}

fn status_strings(next: PaymentStatus) -> Vec<String> {
    PaymentStatus::sources_of(next)
        .into_iter()
        .map(|status| status.to_string())
        .collect()
}
