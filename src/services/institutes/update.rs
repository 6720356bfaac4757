use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstituteService;
use crate::models::institutes::requests::UpdateInstituteRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;
use crate::utils::validate::{validate_optional_email, validate_optional_phone};

pub async fn update_institute(
    service: &InstituteService,
    request: &HttpRequest,
    id: i64,
    update: UpdateInstituteRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if matches!(update.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Ok(validation_failed("Institute name cannot be empty"));
    }
    if let Err(msg) = validate_optional_email(update.email.as_deref()) {
        return Ok(validation_failed(msg));
    }
    if let Err(msg) = validate_optional_phone(update.phone.as_deref()) {
        return Ok(validation_failed(msg));
    }

    match storage.update_institute(id, update).await {
        Ok(Some(institute)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            institute,
            "Institute updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InstituteNotFound,
            "Institute not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update institute: {e}"),
            )),
        ),
    }
}
