use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TutorialService;
use crate::models::tutorials::requests::UpdateTutorialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn update_tutorial(
    service: &TutorialService,
    request: &HttpRequest,
    id: i64,
    update: UpdateTutorialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if matches!(update.title.as_deref(), Some(title) if title.trim().is_empty()) {
        return Ok(validation_failed("Tutorial title cannot be empty"));
    }

    match storage.update_tutorial(id, update).await {
        Ok(Some(tutorial)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tutorial,
            "Tutorial updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TutorialNotFound,
            "Tutorial not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update tutorial: {e}"),
            )),
        ),
    }
}
