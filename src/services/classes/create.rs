use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ClassService, check_class_teacher, check_fee_and_capacity};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, validation_failed};
use crate::utils::validate::validate_code;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    class_data.name = class_data.name.trim().to_string();
    if class_data.name.is_empty() {
        return Ok(validation_failed("Class name is required"));
    }
    if let Err(msg) = validate_code(&class_data.code) {
        return Ok(validation_failed(format!("code: {msg}")));
    }
    if let Err(msg) = check_fee_and_capacity(Some(class_data.monthly_fee), class_data.capacity) {
        return Ok(validation_failed(msg));
    }

    if let Err(resp) = check_class_teacher(&storage, class_data.teacher_id).await {
        return Ok(resp);
    }

    let conflict = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassAlreadyExists,
            "Class code already exists",
        ))
    };

    if let Ok(Some(_)) = storage.get_class_by_code(&class_data.code).await {
        return Ok(conflict());
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} ({}) created", class.id, class.code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(conflict()),
        Err(e) => {
            error!("Class creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Class creation failed: {e}"),
                )),
            )
        }
    }
}
