use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, check_custom_fee};
use crate::models::enrollments::requests::UpdateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn update_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    id: i64,
    update: UpdateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = check_custom_fee(update.custom_fee) {
        return Ok(validation_failed(msg));
    }
    if update.clear_custom_fee && update.custom_fee.is_some() {
        return Ok(validation_failed(
            "custom_fee and clear_custom_fee cannot be used together",
        ));
    }

    match storage.update_enrollment(id, update).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update enrollment: {e}"),
            )),
        ),
    }
}
