use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, check_custom_fee};
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, validation_failed};

pub async fn create_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = check_custom_fee(enrollment.custom_fee) {
        return Ok(validation_failed(msg));
    }

    if let Ok(None) = storage.get_student_by_id(enrollment.student_id).await {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        )));
    }
    if let Ok(None) = storage.get_class_by_id(enrollment.class_id).await {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    let conflict = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentAlreadyExists,
            "Student is already enrolled in this class",
        ))
    };

    if let Ok(Some(_)) = storage
        .get_enrollment_by_student_and_class(enrollment.student_id, enrollment.class_id)
        .await
    {
        return Ok(conflict());
    }

    match storage.create_enrollment(enrollment).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in class {}",
                enrollment.student_id, enrollment.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            )))
        }
        Err(e) if is_unique_violation(&e) => Ok(conflict()),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Enrollment creation failed: {e}"),
            )),
        ),
    }
}
