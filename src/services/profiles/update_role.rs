use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, warn};

use super::ProfileService;
use crate::cache::ObjectCache;
use crate::middlewares::RequireJWT;
use crate::models::profiles::requests::UpdateRoleRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::RoleChange;
use crate::utils::error_response;

pub async fn update_role(
    service: &ProfileService,
    request: &HttpRequest,
    id: i64,
    body: UpdateRoleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(actor_id) = RequireJWT::extract_profile_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 不允许修改自己的角色
    if actor_id == id {
        warn!("Profile {} attempted to change its own role", actor_id);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoleChangeForbidden,
            "You cannot change your own role",
        )));
    }

    let target = match storage.get_profile_by_id(id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfileNotFound,
                "Profile not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::ProfileNotFound)),
    };

    // 角色未变化，不写审计
    if target.role == body.role {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(target, "Role unchanged")));
    }

    let change = RoleChange {
        profile_id: id,
        new_role: body.role,
        changed_by: actor_id,
        reason: body.reason.filter(|r| !r.trim().is_empty()),
        ip_address: request
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string),
    };

    match storage.change_profile_role(change).await {
        Ok(Some(profile)) => {
            info!(
                "Profile {} role changed {} -> {} by profile {}",
                id, target.role, profile.role, actor_id
            );

            // 让认证缓存中的旧角色失效
            if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
                cache
                    .remove(&format!("profile:{}", profile.auth_user_id))
                    .await;
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "Role updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "Profile not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::ProfileNotFound)),
    }
}
