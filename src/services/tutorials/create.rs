use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TutorialService;
use crate::models::tutorials::requests::CreateTutorialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn create_tutorial(
    service: &TutorialService,
    request: &HttpRequest,
    mut tutorial: CreateTutorialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    tutorial.title = tutorial.title.trim().to_string();
    if tutorial.title.is_empty() {
        return Ok(validation_failed("Tutorial title is required"));
    }

    if let Some(class_id) = tutorial.class_id
        && let Ok(None) = storage.get_class_by_id(class_id).await
    {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    match storage.create_tutorial(tutorial).await {
        Ok(tutorial) => {
            info!("Tutorial {} created", tutorial.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                tutorial,
                "Tutorial created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Tutorial creation failed: {e}"),
            )),
        ),
    }
}
