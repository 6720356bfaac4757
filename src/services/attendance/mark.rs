use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, check_entries};
use crate::models::attendance::requests::MarkAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_foreign_key_violation, validation_failed};

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    body: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = check_entries(&body.entries) {
        return Ok(validation_failed(msg));
    }

    if let Ok(None) = storage.get_class_by_id(body.class_id).await {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    let class_id = body.class_id;
    let date = body.attendance_date;

    match storage.upsert_attendance(body).await {
        Ok(records) => {
            info!(
                "Recorded {} attendance entries for class {} on {}",
                records.len(),
                class_id,
                date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                records,
                "Attendance recorded successfully",
            )))
        }
        Err(e) if is_foreign_key_violation(&e) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student or session not found"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to record attendance: {e}"),
            )),
        ),
    }
}
