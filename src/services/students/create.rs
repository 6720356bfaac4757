use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, validate_contacts};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_unique_violation, validation_failed};
use crate::utils::validate::validate_code;

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    student.full_name = student.full_name.trim().to_string();
    if student.full_name.is_empty() {
        return Ok(validation_failed("Student name is required"));
    }
    if let Err(msg) = validate_code(&student.student_code) {
        return Ok(validation_failed(format!("student_code: {msg}")));
    }
    if let Err(msg) = validate_contacts(
        student.email.as_deref(),
        student.phone.as_deref(),
        student.guardian_email.as_deref(),
        student.guardian_phone.as_deref(),
    ) {
        return Ok(validation_failed(msg));
    }

    let conflict = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentAlreadyExists,
            "Student code already exists",
        ))
    };

    if let Ok(Some(_)) = storage.get_student_by_code(&student.student_code).await {
        return Ok(conflict());
    }

    match storage.create_student(student).await {
        Ok(student) => {
            info!("Student {} ({}) created", student.id, student.student_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) if is_unique_violation(&e) => Ok(conflict()),
        Err(e) => {
            error!("Student creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Student creation failed: {e}"),
                )),
            )
        }
    }
}
