use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TutorialService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_tutorial(
    service: &TutorialService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_tutorial(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Tutorial deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TutorialNotFound,
            "Tutorial not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Tutorial deletion failed: {e}"),
            )),
        ),
    }
}
