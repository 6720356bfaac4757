use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TutorialService;
use crate::models::tutorials::requests::UpsertProgressRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_foreign_key_violation, validation_failed};

fn tutorial_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::TutorialNotFound,
        "Tutorial not found",
    ))
}

pub async fn list_progress(
    service: &TutorialService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Ok(None) = storage.get_tutorial_by_id(id).await {
        return Ok(tutorial_not_found());
    }

    match storage.list_tutorial_progress(id).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Tutorial progress retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve tutorial progress: {e}"),
            )),
        ),
    }
}

pub async fn upsert_progress(
    service: &TutorialService,
    request: &HttpRequest,
    id: i64,
    body: UpsertProgressRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if !(0..=100).contains(&body.progress_percent) {
        return Ok(validation_failed("progress_percent must be between 0 and 100"));
    }

    if let Ok(None) = storage.get_tutorial_by_id(id).await {
        return Ok(tutorial_not_found());
    }

    // 进度达到 100 时由存储层记录完成时间
    match storage.upsert_tutorial_progress(id, body).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Tutorial progress updated successfully",
        ))),
        Err(e) if is_foreign_key_violation(&e) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update tutorial progress: {e}"),
            )),
        ),
    }
}
