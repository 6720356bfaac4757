use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::institutes::requests::{
    CreateInstituteRequest, InstituteListQuery, UpdateInstituteRequest,
};
use crate::models::profiles::entities::UserRole;
use crate::services::InstituteService;
use crate::utils::SafeIDI64;

// 懒加载的全局 INSTITUTE_SERVICE 实例
static INSTITUTE_SERVICE: Lazy<InstituteService> = Lazy::new(InstituteService::new_lazy);

pub async fn list_institutes(
    req: HttpRequest,
    query: web::Query<InstituteListQuery>,
) -> ActixResult<HttpResponse> {
    INSTITUTE_SERVICE
        .list_institutes(&req, query.into_inner())
        .await
}

pub async fn create_institute(
    req: HttpRequest,
    body: web::Json<CreateInstituteRequest>,
) -> ActixResult<HttpResponse> {
    INSTITUTE_SERVICE
        .create_institute(&req, body.into_inner())
        .await
}

pub async fn get_institute(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INSTITUTE_SERVICE.get_institute(&req, id.0).await
}

pub async fn update_institute(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateInstituteRequest>,
) -> ActixResult<HttpResponse> {
    INSTITUTE_SERVICE
        .update_institute(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_institutes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/institutes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_institutes)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_institute)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_institute)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_institute)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
