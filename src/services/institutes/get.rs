use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstituteService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_institute(
    service: &InstituteService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_institute_by_id(id).await {
        Ok(Some(institute)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            institute,
            "Institute retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InstituteNotFound,
            "Institute not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get institute: {e}"),
            )),
        ),
    }
}
