use chrono::NaiveDate;
use tracing::info;

use crate::errors::Result;
use crate::models::payments::responses::{FeeGenerationResult, OverdueMarkResult};
use crate::storage::Storage;
use crate::utils::dates::{due_date_for_month, month_start};

/// 为目标月份生成学费记录
///
/// `target_month` 可以是该月任意一天；同一月份重复执行不会产生重复记录。
pub async fn generate_fees(
    storage: &dyn Storage,
    target_month: NaiveDate,
    due_day: u32,
) -> Result<FeeGenerationResult> {
    let payment_month = month_start(target_month);
    let due_date = due_date_for_month(payment_month, due_day);

    info!(
        "Generating monthly fees for {} (due {})",
        payment_month, due_date
    );
    let count = storage.generate_monthly_fees(payment_month, due_date).await?;
    info!("Generated {} fee records for {}", count, payment_month);

    Ok(FeeGenerationResult {
        payment_month,
        due_date,
        count,
    })
}

/// 将到期日早于 `today` 的未缴记录标记为逾期
pub async fn mark_overdue(storage: &dyn Storage, today: NaiveDate) -> Result<OverdueMarkResult> {
    info!("Marking payments due before {} as overdue", today);
    let count = storage.mark_overdue_payments(today).await?;
    info!("Marked {} payments as overdue", count);

    Ok(OverdueMarkResult {
        as_of: today,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollments::{
        entities::EnrollmentStatus, requests::UpdateEnrollmentRequest,
    };
    use crate::models::payments::{
        entities::{PaymentMethod, PaymentStatus},
        requests::{CreatePaymentRequest, PaymentListQuery},
    };
    use crate::models::PaginationQuery;
    use crate::storage::PaymentSettlement;
    use crate::storage::testing::{
        memory_storage, seed_class, seed_enrollment, seed_student, student_request,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn month_query(month: NaiveDate) -> PaymentListQuery {
        PaymentListQuery {
            pagination: PaginationQuery { page: 1, size: 100 },
            status: None,
            student_id: None,
            month: Some(month),
        }
    }

    #[tokio::test]
    async fn test_generate_fees_is_idempotent() {
        let storage = memory_storage().await;
        let class = seed_class(&storage, "PIANO", 120.0).await;
        for i in 0..10 {
            let student = seed_student(&storage, student_request(&format!("S{i:02}"))).await;
            seed_enrollment(&storage, student.id, class.id, None).await;
        }

        let march = date(2025, 3, 1);
        let first = generate_fees(storage.as_ref(), march, 5).await.expect("first run");
        assert_eq!(first.count, 10);
        assert_eq!(first.payment_month, march);
        assert_eq!(first.due_date, date(2025, 3, 5));

        let second = generate_fees(storage.as_ref(), date(2025, 3, 20), 5)
            .await
            .expect("second run");
        assert_eq!(second.count, 0);

        let listed = storage
            .list_payments_with_pagination(month_query(march))
            .await
            .expect("list payments");
        assert_eq!(listed.pagination.total, 10);
        assert!(
            listed
                .items
                .iter()
                .all(|p| p.payment.status == PaymentStatus::Unpaid && p.payment.amount == 120.0)
        );
    }

    #[tokio::test]
    async fn test_custom_fee_inactive_and_free_enrollments() {
        let storage = memory_storage().await;
        let paid_class = seed_class(&storage, "CHESS", 80.0).await;
        let free_class = seed_class(&storage, "OPEN", 0.0).await;

        let a = seed_student(&storage, student_request("A")).await;
        let b = seed_student(&storage, student_request("B")).await;
        let c = seed_student(&storage, student_request("C")).await;

        seed_enrollment(&storage, a.id, paid_class.id, Some(50.0)).await;
        let dropped = seed_enrollment(&storage, b.id, paid_class.id, None).await;
        seed_enrollment(&storage, c.id, free_class.id, None).await;

        storage
            .update_enrollment(
                dropped.id,
                UpdateEnrollmentRequest {
                    status: Some(EnrollmentStatus::Inactive),
                    custom_fee: None,
                    clear_custom_fee: false,
                },
            )
            .await
            .expect("update enrollment");

        let april = date(2025, 4, 1);
        let result = generate_fees(storage.as_ref(), april, 10).await.expect("generate");
        assert_eq!(result.count, 1);

        let listed = storage
            .list_payments_with_pagination(month_query(april))
            .await
            .expect("list payments");
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].payment.student_id, a.id);
        assert_eq!(listed.items[0].payment.amount, 50.0);
        assert_eq!(listed.items[0].payment.due_date, date(2025, 4, 10));
    }

    #[tokio::test]
    async fn test_all_inactive_generates_nothing() {
        let storage = memory_storage().await;
        let class = seed_class(&storage, "ART", 60.0).await;
        let student = seed_student(&storage, student_request("X")).await;
        let enrollment = seed_enrollment(&storage, student.id, class.id, None).await;
        storage
            .update_enrollment(
                enrollment.id,
                UpdateEnrollmentRequest {
                    status: Some(EnrollmentStatus::Dropped),
                    custom_fee: None,
                    clear_custom_fee: false,
                },
            )
            .await
            .expect("update enrollment");

        let result = generate_fees(storage.as_ref(), date(2025, 5, 1), 5)
            .await
            .expect("generate");
        assert_eq!(result.count, 0);
    }

    #[tokio::test]
    async fn test_mark_overdue_only_touches_past_due_unpaid() {
        let storage = memory_storage().await;
        let class = seed_class(&storage, "MATH", 100.0).await;
        let today = date(2025, 3, 10);

        let mut payments = Vec::new();
        for (i, due) in [date(2025, 3, 5), date(2025, 3, 10), date(2025, 3, 15), date(2025, 3, 1)]
            .into_iter()
            .enumerate()
        {
            let student = seed_student(&storage, student_request(&format!("M{i}"))).await;
            let enrollment = seed_enrollment(&storage, student.id, class.id, None).await;
            let payment = storage
                .create_payment(CreatePaymentRequest {
                    student_id: student.id,
                    enrollment_id: enrollment.id,
                    amount: 100.0,
                    payment_month: date(2025, 3, 1),
                    due_date: due,
                    notes: None,
                })
                .await
                .expect("payment created");
            payments.push(payment);
        }

        // 已缴记录即使过期也不变
        storage
            .mark_payment_paid(
                payments[3].id,
                PaymentSettlement {
                    payment_method: PaymentMethod::Cash,
                    transaction_id: None,
                    payment_date: date(2025, 3, 2),
                },
            )
            .await
            .expect("mark paid");

        let result = mark_overdue(storage.as_ref(), today).await.expect("mark overdue");
        assert_eq!(result.count, 1);
        assert_eq!(result.as_of, today);

        let mut statuses = Vec::new();
        for payment in &payments {
            let current = storage
                .get_payment_by_id(payment.id)
                .await
                .expect("get payment")
                .expect("payment exists");
            statuses.push(current.status);
        }
        assert_eq!(
            statuses,
            vec![
                PaymentStatus::Overdue,
                PaymentStatus::Unpaid,
                PaymentStatus::Unpaid,
                PaymentStatus::Paid,
            ]
        );

        let again = mark_overdue(storage.as_ref(), today).await.expect("second run");
        assert_eq!(again.count, 0);
    }
}
