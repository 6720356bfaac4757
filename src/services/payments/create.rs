use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::PaymentService;
use crate::models::payments::requests::CreatePaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, validation_failed};

pub async fn create_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment: CreatePaymentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if !payment.amount.is_finite() || payment.amount <= 0.0 {
        return Ok(validation_failed("Amount must be greater than 0"));
    }

    // 选课必须存在且属于该学生
    match storage.get_enrollment_by_id(payment.enrollment_id).await {
        Ok(Some(enrollment)) if enrollment.student_id == payment.student_id => {}
        Ok(Some(_)) => {
            return Ok(validation_failed(
                "Enrollment does not belong to the given student",
            ));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get enrollment: {e}"),
                )),
            );
        }
    }

    match storage.create_payment(payment).await {
        Ok(payment) => {
            info!(
                "Payment {} created for enrollment {} ({})",
                payment.id, payment.enrollment_id, payment.payment_month
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(payment, "Payment created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::Conflict,
                "A payment already exists for this enrollment and month",
            ),
        )),
        Err(e) => {
            error!("Payment creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Payment creation failed: {e}"),
                )),
            )
        }
    }
}
