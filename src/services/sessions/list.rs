use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SessionService;
use crate::models::sessions::requests::SessionListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_sessions(
    service: &SessionService,
    request: &HttpRequest,
    class_id: i64,
    query: SessionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class information: {e}"),
                )),
            );
        }
    }

    match storage.list_class_sessions(class_id, query).await {
        Ok(sessions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sessions,
            "Class sessions retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve class sessions: {e}"),
            )),
        ),
    }
}
