use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::models::profiles::requests::ProfileListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_profiles(
    service: &ProfileService,
    request: &HttpRequest,
    query: ProfileListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_profiles_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Profile list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve profile list: {e}"),
            )),
        ),
    }
}
