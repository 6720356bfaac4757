use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PaymentService, check_settlement};
use crate::errors::EduDeskError;
use crate::models::payments::requests::MarkPaidRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::PaymentSettlement;
use crate::utils::dates::today_utc;
use crate::utils::error_response;

pub async fn mark_paid(
    service: &PaymentService,
    request: &HttpRequest,
    id: i64,
    body: MarkPaidRequest,
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

    match check_settlement(current.status) {
        Ok(()) => {}
        Err(EduDeskError::Conflict(msg)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::PaymentAlreadyPaid,
                msg,
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::PaymentNotFound)),
    }

    let settlement = PaymentSettlement {
        payment_method: body.payment_method,
        transaction_id: body.transaction_id.filter(|t| !t.trim().is_empty()),
        payment_date: body.payment_date.unwrap_or_else(today_utc),
    };

    match storage.mark_payment_paid(id, settlement).await {
        Ok(Some(payment)) => {
            info!("Payment {} marked as paid", payment.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(payment, "Payment marked as paid")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PaymentNotFound,
            "Payment not found",
        ))),
        // 并发请求已先一步结清
        Err(EduDeskError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::PaymentAlreadyPaid, msg),
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::PaymentNotFound)),
    }
}
