use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_class_teacher, check_fee_and_capacity};
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if matches!(update_data.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Ok(validation_failed("Class name cannot be empty"));
    }
    if let Err(msg) = check_fee_and_capacity(update_data.monthly_fee, update_data.capacity) {
        return Ok(validation_failed(msg));
    }
    if let Err(resp) = check_class_teacher(&storage, update_data.teacher_id).await {
        return Ok(resp);
    }

    // 学费变更只影响之后生成的账单
    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update class information: {e}"),
            )),
        ),
    }
}
