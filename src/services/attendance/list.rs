use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (Some(class_id), Some(date)) = (query.class_id, query.date) else {
        return Ok(validation_failed("class_id and date are required"));
    };

    match storage.list_attendance(class_id, date).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance: {e}"),
            )),
        ),
    }
}
