use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::models::profiles::requests::RoleAuditQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_role_audits(
    service: &ProfileService,
    request: &HttpRequest,
    query: RoleAuditQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_role_audits_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Role audit log retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve role audit log: {e}"),
            )),
        ),
    }
}
