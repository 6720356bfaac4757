use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::{
    entities::UserRole,
    requests::{ProfileListQuery, RoleAuditQuery, UpdateRoleRequest},
};
use crate::services::ProfileService;
use crate::utils::SafeIDI64;

// 懒加载的全局 PROFILE_SERVICE 实例
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn get_me(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_me(&req).await
}

pub async fn list_profiles(
    req: HttpRequest,
    query: web::Query<ProfileListQuery>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.list_profiles(&req, query.into_inner()).await
}

pub async fn update_role(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateRoleRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .update_role(&req, id.0, body.into_inner())
        .await
}

pub async fn list_role_audits(
    req: HttpRequest,
    query: web::Query<RoleAuditQuery>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .list_role_audits(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_profiles_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profiles")
            .wrap(middlewares::RequireJWT)
            // 任意已登录用户查看自己的档案
            .route("/me", web::get().to(get_me))
            .service(
                web::resource("")
                    .route(web::get().to(list_profiles))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            )
            .service(
                web::resource("/role-audits")
                    .route(web::get().to(list_role_audits))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            )
            // 角色只能由管理员修改，并写入审计记录
            .service(
                web::resource("/{id}/role")
                    .route(web::put().to(update_role))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            ),
    );
}
