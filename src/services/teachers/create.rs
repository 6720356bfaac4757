use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;
use crate::utils::validate::{validate_optional_email, validate_optional_phone};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    mut teacher: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    teacher.full_name = teacher.full_name.trim().to_string();
    if teacher.full_name.is_empty() {
        return Ok(validation_failed("Teacher name is required"));
    }
    if let Err(msg) = validate_optional_email(teacher.email.as_deref()) {
        return Ok(validation_failed(msg));
    }
    if let Err(msg) = validate_optional_phone(teacher.phone.as_deref()) {
        return Ok(validation_failed(msg));
    }

    if let Some(institute_id) = teacher.institute_id
        && let Ok(None) = storage.get_institute_by_id(institute_id).await
    {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InstituteNotFound,
            "Institute not found",
        )));
    }

    match storage.create_teacher(teacher).await {
        Ok(teacher) => {
            info!("Teacher {} created", teacher.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(teacher, "Teacher created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Teacher creation failed: {e}"),
            )),
        ),
    }
}
