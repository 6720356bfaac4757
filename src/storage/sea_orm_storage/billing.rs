//! 账单任务存储操作：生成月度学费、标记逾期、查询提醒目标

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::communication_logs::{Column as LogColumn, Entity as CommunicationLogs};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::fee_payments::{ActiveModel, Column, Entity as FeePayments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    communications::entities::{CommunicationKind, CommunicationStatus},
    enrollments::entities::EnrollmentStatus,
    payments::entities::{PaymentReminderTarget, PaymentStatus},
};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
    sea_query::Expr,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 为所有有效选课生成 payment_month 的学费记录
    ///
    /// 已有记录的选课跳过；应收金额为选课自定义学费，否则为班级月学费；
    /// 金额不为正数的选课不计费。整个过程在一个事务内完成。
    pub async fn generate_monthly_fees_impl(
        &self,
        payment_month: chrono::NaiveDate,
        due_date: chrono::NaiveDate,
    ) -> Result<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询选课失败: {e}")))?;

        let class_ids: HashSet<i64> = enrollments.iter().map(|e| e.class_id).collect();
        let class_fees: HashMap<i64, f64> = Classes::find()
            .filter(ClassColumn::Id.is_in(class_ids))
            .all(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.monthly_fee))
            .collect();

        let billed: HashSet<i64> = FeePayments::find()
            .select_only()
            .column(Column::EnrollmentId)
            .filter(Column::PaymentMonth.eq(payment_month))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询已生成学费失败: {e}")))?
            .into_iter()
            .collect();

        let now = chrono::Utc::now().timestamp();
        let mut models = Vec::new();

        for enrollment in enrollments {
            if billed.contains(&enrollment.id) {
                continue;
            }

            let Some(amount) = enrollment
                .custom_fee
                .or_else(|| class_fees.get(&enrollment.class_id).copied())
            else {
                continue;
            };

            if amount <= 0.0 {
                debug!(
                    "Skipping enrollment {} with non-positive fee {}",
                    enrollment.id, amount
                );
                continue;
            }

            models.push(ActiveModel {
                student_id: Set(enrollment.student_id),
                enrollment_id: Set(enrollment.id),
                amount: Set(amount),
                amount_paid: Set(None),
                payment_month: Set(payment_month),
                due_date: Set(due_date),
                status: Set(PaymentStatus::Unpaid.to_string()),
                payment_method: Set(None),
                transaction_id: Set(None),
                payment_date: Set(None),
                notes: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            });
        }

        let count = models.len() as u64;
        if !models.is_empty() {
            FeePayments::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| EduDeskError::database_operation(format!("生成学费记录失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(count)
    }

    /// 将 due_date 早于 today 的未缴记录标记为逾期
    pub async fn mark_overdue_payments_impl(&self, today: chrono::NaiveDate) -> Result<u64> {
        let result = FeePayments::update_many()
            .col_expr(Column::Status, Expr::value(PaymentStatus::Overdue.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Status.eq(PaymentStatus::Unpaid.to_string()))
            .filter(Column::DueDate.lt(today))
            .exec(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("标记逾期失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 查询 due_date 当天到期的未缴记录，并合并学生、监护人与班级信息
    pub async fn list_reminder_targets_impl(
        &self,
        due_date: chrono::NaiveDate,
    ) -> Result<Vec<PaymentReminderTarget>> {
        let payments = FeePayments::find()
            .filter(Column::Status.eq(PaymentStatus::Unpaid.to_string()))
            .filter(Column::DueDate.eq(due_date))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询待提醒学费失败: {e}")))?;

        if payments.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: HashSet<i64> = payments.iter().map(|p| p.student_id).collect();
        let students: HashMap<i64, _> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let enrollment_ids: HashSet<i64> = payments.iter().map(|p| p.enrollment_id).collect();
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

        let targets = payments
            .into_iter()
            .filter_map(|p| {
                // 学生已被删除时无法联系，跳过
                let student = students.get(&p.student_id)?;
                let class_name = enrollment_classes
                    .get(&p.enrollment_id)
                    .and_then(|id| class_names.get(id))
                    .cloned();

                Some(PaymentReminderTarget {
                    payment_id: p.id,
                    student_id: p.student_id,
                    student_name: student.full_name.clone(),
                    student_email: student.email.clone(),
                    student_phone: student.phone.clone(),
                    guardian_name: student.guardian_name.clone(),
                    guardian_email: student.guardian_email.clone(),
                    guardian_phone: student.guardian_phone.clone(),
                    class_name,
                    amount: p.amount,
                    payment_month: p.payment_month,
                    due_date: p.due_date,
                })
            })
            .collect();

        Ok(targets)
    }

    /// [from, to) 内是否已有成功发送的缴费提醒
    pub async fn has_sent_reminder_between_impl(
        &self,
        payment_id: i64,
        from: i64,
        to: i64,
    ) -> Result<bool> {
        let count = CommunicationLogs::find()
            .filter(LogColumn::PaymentId.eq(payment_id))
            .filter(LogColumn::Kind.eq(CommunicationKind::PaymentReminder.to_string()))
            .filter(LogColumn::Status.eq(CommunicationStatus::Sent.to_string()))
            .filter(LogColumn::CreatedAt.gte(from))
            .filter(LogColumn::CreatedAt.lt(to))
            .count(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询提醒记录失败: {e}")))?;

        Ok(count > 0)
    }
}
