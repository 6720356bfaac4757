use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstituteService;
use crate::models::institutes::requests::InstituteListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_institutes(
    service: &InstituteService,
    request: &HttpRequest,
    query: InstituteListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_institutes_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Institute list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve institute list: {e}"),
            )),
        ),
    }
}
