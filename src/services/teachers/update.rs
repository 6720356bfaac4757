use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;
use crate::utils::validate::{validate_optional_email, validate_optional_phone};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    update: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if matches!(update.full_name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Ok(validation_failed("Teacher name cannot be empty"));
    }
    if let Err(msg) = validate_optional_email(update.email.as_deref()) {
        return Ok(validation_failed(msg));
    }
    if let Err(msg) = validate_optional_phone(update.phone.as_deref()) {
        return Ok(validation_failed(msg));
    }

    match storage.update_teacher(id, update).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update teacher: {e}"),
            )),
        ),
    }
}
