use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::InstituteService;
use crate::models::institutes::requests::CreateInstituteRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, validation_failed};
use crate::utils::validate::{validate_code, validate_optional_email, validate_optional_phone};

pub async fn create_institute(
    service: &InstituteService,
    request: &HttpRequest,
    mut institute: CreateInstituteRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    institute.name = institute.name.trim().to_string();
    if institute.name.is_empty() {
        return Ok(validation_failed("Institute name is required"));
    }
    if let Err(msg) = validate_code(&institute.code) {
        return Ok(validation_failed(msg));
    }
    if let Err(msg) = validate_optional_email(institute.email.as_deref()) {
        return Ok(validation_failed(msg));
    }
    if let Err(msg) = validate_optional_phone(institute.phone.as_deref()) {
        return Ok(validation_failed(msg));
    }

    let conflict = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InstituteAlreadyExists,
            "Institute code already exists",
        ))
    };

    if let Ok(Some(_)) = storage.get_institute_by_code(&institute.code).await {
        return Ok(conflict());
    }

    match storage.create_institute(institute).await {
        Ok(institute) => {
            info!("Institute {} ({}) created", institute.id, institute.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                institute,
                "Institute created successfully",
            )))
        }
        Err(e) if is_unique_violation(&e) => Ok(conflict()),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Institute creation failed: {e}"),
            )),
        ),
    }
}
