use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PaymentService, check_status_update};
use crate::errors::EduDeskError;
use crate::models::payments::requests::UpdatePaymentStatusRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;

pub async fn update_status(
    service: &PaymentService,
    request: &HttpRequest,
    id: i64,
    body: UpdatePaymentStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let current = match storage.get_payment_by_id(id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::PaymentNotFound)),
    };

    if let Err(e) = check_status_update(current.status, body.status, current.amount, body.amount_paid)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PaymentInvalidTransition,
            e.message(),
        )));
    }

    match storage
        .update_payment_status(id, body.status, body.amount_paid, body.notes)
        .await
    {
        Ok(Some(payment)) => {
            info!(
                "Payment {} status changed: {} -> {}",
                id, current.status, payment.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                payment,
                "Payment status updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PaymentNotFound,
            "Payment not found",
        ))),
        Err(EduDeskError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::PaymentInvalidTransition, msg),
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::PaymentNotFound)),
    }
}
