use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, validate_contacts};
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if matches!(update.full_name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Ok(validation_failed("Student name cannot be empty"));
    }
    if let Err(msg) = validate_contacts(
        update.email.as_deref(),
        update.phone.as_deref(),
        update.guardian_email.as_deref(),
        update.guardian_phone.as_deref(),
    ) {
        return Ok(validation_failed(msg));
    }

    match storage.update_student(id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update student: {e}"),
            )),
        ),
    }
}
