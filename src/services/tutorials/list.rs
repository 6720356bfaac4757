use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TutorialService;
use crate::models::tutorials::requests::TutorialListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_tutorials(
    service: &TutorialService,
    request: &HttpRequest,
    query: TutorialListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_tutorials_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Tutorial list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve tutorial list: {e}"),
            )),
        ),
    }
}
