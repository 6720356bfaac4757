pub mod create;
pub mod get;
pub mod jobs;
pub mod list;
pub mod mark_paid;
pub mod update_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{EduDeskError, Result};
use crate::models::payments::{
    entities::PaymentStatus,
    requests::{
        CreatePaymentRequest, GenerateFeesRequest, MarkPaidRequest, PaymentListQuery,
        UpdatePaymentStatusRequest,
    },
};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取学费列表
    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        query: PaymentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, request, query).await
    }

    // 获取学费详情
    pub async fn get_payment(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_payment(self, request, id).await
    }

    // 手动创建学费记录
    pub async fn create_payment(
        &self,
        request: &HttpRequest,
        payment: CreatePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, request, payment).await
    }

    // 确认收款
    pub async fn mark_paid(
        &self,
        request: &HttpRequest,
        id: i64,
        body: MarkPaidRequest,
    ) -> ActixResult<HttpResponse> {
        mark_paid::mark_paid(self, request, id, body).await
    }

    // 手动更新状态
    pub async fn update_status(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdatePaymentStatusRequest,
    ) -> ActixResult<HttpResponse> {
        update_status::update_status(self, request, id, body).await
    }

    // 管理员手动生成学费
    pub async fn generate_fees(
        &self,
        request: &HttpRequest,
        body: GenerateFeesRequest,
    ) -> ActixResult<HttpResponse> {
        jobs::generate_fees(request, body).await
    }

    // 管理员手动标记逾期
    pub async fn mark_overdue(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        jobs::mark_overdue(request).await
    }
}

/// 确认收款前的状态检查：已缴记录不能再次确认
pub fn check_settlement(current: PaymentStatus) -> Result<()> {
    if current == PaymentStatus::Paid {
        return Err(EduDeskError::conflict("Payment is already marked as paid"));
    }
    if !current.can_transition_to(PaymentStatus::Paid) {
        return Err(EduDeskError::validation(format!(
            "Cannot mark a {current} payment as paid"
        )));
    }
    Ok(())
}

/// 手动状态更新检查：只允许登记部分缴费或逾期
pub fn check_status_update(
    current: PaymentStatus,
    next: PaymentStatus,
    amount: f64,
    amount_paid: Option<f64>,
) -> Result<()> {
    match next {
        PaymentStatus::Partial | PaymentStatus::Overdue => {}
        PaymentStatus::Paid => {
            return Err(EduDeskError::validation(
                "Use mark-paid to settle a payment",
            ));
        }
        PaymentStatus::Unpaid => {
            return Err(EduDeskError::validation(
                "A payment cannot be moved back to unpaid",
            ));
        }
    }

    if !current.can_transition_to(next) {
        return Err(EduDeskError::validation(format!(
            "Invalid status transition: {current} -> {next}"
        )));
    }

    if next == PaymentStatus::Partial {
        match amount_paid {
            Some(paid) if paid > 0.0 && paid < amount => {}
            Some(_) => {
                return Err(EduDeskError::validation(
                    "amount_paid must be greater than 0 and less than the amount due",
                ));
            }
            None => {
                return Err(EduDeskError::validation(
                    "amount_paid is required for a partial payment",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_rules() {
        assert!(check_settlement(PaymentStatus::Unpaid).is_ok());
        assert!(check_settlement(PaymentStatus::Overdue).is_ok());
        assert!(check_settlement(PaymentStatus::Partial).is_ok());
        assert!(matches!(
            check_settlement(PaymentStatus::Paid),
            Err(EduDeskError::Conflict(_))
        ));
    }

    #[test]
    fn test_status_update_rules() {
        use PaymentStatus::*;

        assert!(check_status_update(Unpaid, Partial, 100.0, Some(40.0)).is_ok());
        assert!(check_status_update(Overdue, Partial, 100.0, Some(40.0)).is_ok());
        assert!(check_status_update(Unpaid, Overdue, 100.0, None).is_ok());

        // 不能回到 unpaid
        assert!(check_status_update(Partial, Unpaid, 100.0, None).is_err());
        // 已缴不能再改
        assert!(check_status_update(Paid, Partial, 100.0, Some(10.0)).is_err());
        // partial -> overdue 不在状态机中
        assert!(check_status_update(Partial, Overdue, 100.0, None).is_err());
        // 结清走 mark-paid
        assert!(check_status_update(Unpaid, Paid, 100.0, None).is_err());
    }

    #[test]
    fn test_partial_amount_bounds() {
        use PaymentStatus::*;

        assert!(check_status_update(Unpaid, Partial, 100.0, None).is_err());
        assert!(check_status_update(Unpaid, Partial, 100.0, Some(0.0)).is_err());
        assert!(check_status_update(Unpaid, Partial, 100.0, Some(100.0)).is_err());
    }

    #[test]
    fn test_sources_of_follow_transitions() {
        use PaymentStatus::*;

        assert_eq!(PaymentStatus::sources_of(Paid), vec![Unpaid, Overdue, Partial]);
        assert_eq!(PaymentStatus::sources_of(Partial), vec![Unpaid, Overdue]);
        assert_eq!(PaymentStatus::sources_of(Overdue), vec![Unpaid]);
        assert!(PaymentStatus::sources_of(Unpaid).is_empty());
    }

    #[actix_web::test]
    async fn test_settled_payment_survives_stale_status_update() {
        use crate::models::payments::{entities::PaymentMethod, requests::CreatePaymentRequest};
        use crate::storage::PaymentSettlement;
        use crate::storage::testing::{
            memory_storage, seed_class, seed_enrollment, seed_student, student_request,
        };
        use chrono::NaiveDate;

        let storage = memory_storage().await;
        let student = seed_student(&storage, student_request("P-RACE")).await;
        let class = seed_class(&storage, "RACE-1", 100.0).await;
        let enrollment = seed_enrollment(&storage, student.id, class.id, None).await;

        let payment = storage
            .create_payment(CreatePaymentRequest {
                student_id: student.id,
                enrollment_id: enrollment.id,
                amount: 100.0,
                payment_month: NaiveDate::from_ymd_opt(2025, 5, 1).expect("date"),
                due_date: NaiveDate::from_ymd_opt(2025, 5, 5).expect("date"),
                notes: None,
            })
            .await
            .expect("payment created");

        // 两个请求都读到 unpaid，检查均通过
        let stale = storage
            .get_payment_by_id(payment.id)
            .await
            .expect("read")
            .expect("exists");
        assert!(check_status_update(stale.status, PaymentStatus::Partial, 100.0, Some(40.0)).is_ok());
        assert!(check_settlement(stale.status).is_ok());

        let settlement = PaymentSettlement {
            payment_method: PaymentMethod::Cash,
            transaction_id: None,
            payment_date: NaiveDate::from_ymd_opt(2025, 5, 3).expect("date"),
        };
        let paid = storage
            .mark_payment_paid(payment.id, settlement.clone())
            .await
            .expect("settled")
            .expect("exists");
        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.amount_paid, Some(100.0));

        let late_update = storage
            .update_payment_status(payment.id, PaymentStatus::Partial, Some(40.0), None)
            .await;
        assert!(matches!(late_update, Err(EduDeskError::Conflict(_))));

        let second_settlement = storage.mark_payment_paid(payment.id, settlement).await;
        assert!(matches!(second_settlement, Err(EduDeskError::Conflict(_))));

        let current = storage
            .get_payment_by_id(payment.id)
            .await
            .expect("read")
            .expect("exists");
        assert_eq!(current.status, PaymentStatus::Paid);
        assert_eq!(current.amount_paid, Some(100.0));
    }

    #[actix_web::test]
    async fn test_mark_paid_twice_conflicts() {
        use crate::routes::payments as handlers;
        use crate::storage::testing::{
            memory_storage, seed_class, seed_enrollment, seed_student, student_request,
        };
        use actix_web::{App, http::StatusCode, test, web};
        use chrono::NaiveDate;
        use serde_json::{Value, json};

        let storage = memory_storage().await;
        let student = seed_student(&storage, student_request("P-1")).await;
        let class = seed_class(&storage, "ART-1", 75.0).await;
        seed_enrollment(&storage, student.id, class.id, None).await;

        let month = NaiveDate::from_ymd_opt(2025, 4, 1).expect("date");
        let due = NaiveDate::from_ymd_opt(2025, 4, 5).expect("date");
        storage
            .generate_monthly_fees(month, due)
            .await
            .expect("fees generated");
        let payment_id = storage
            .list_payments_with_pagination(
                serde_json::from_value(json!({"student_id": student.id})).expect("query"),
            )
            .await
            .expect("payments")
            .items[0]
            .payment
            .id;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/payments/{id}/mark-paid", web::post().to(handlers::mark_paid))
                .route("/payments/{id}/status", web::put().to(handlers::update_status)),
        )
        .await;

        let uri = format!("/payments/{payment_id}/mark-paid");
        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({"payment_method": "cash"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "paid");
        assert!(!body["data"]["payment_date"].is_null());

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({"payment_method": "cash"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        // 已缴记录不能改回部分缴费
        let req = test::TestRequest::put()
            .uri(&format!("/payments/{payment_id}/status"))
            .set_json(json!({"status": "partial", "amount_paid": 10.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_admin_generate_without_service_database() {
        use crate::routes::payments as handlers;
        use actix_web::{App, http::StatusCode, test, web};
        use serde_json::Value;

        let app = test::init_service(
            App::new().route("/payments/generate", web::post().to(handlers::generate_fees)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/payments/generate")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Service database URL not configured");
    }
}
