use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommunicationService;
use crate::models::communications::requests::CommunicationListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_communications(
    service: &CommunicationService,
    request: &HttpRequest,
    query: CommunicationListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_communication_logs_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Communication log retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve communication log: {e}"),
            )),
        ),
    }
}
