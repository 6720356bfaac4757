use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::communications::requests::{CommunicationListQuery, SendCommunicationRequest};
use crate::models::profiles::entities::UserRole;
use crate::services::CommunicationService;

// 懒加载的全局 COMMUNICATION_SERVICE 实例
static COMMUNICATION_SERVICE: Lazy<CommunicationService> =
    Lazy::new(CommunicationService::new_lazy);

pub async fn list_communications(
    req: HttpRequest,
    query: web::Query<CommunicationListQuery>,
) -> ActixResult<HttpResponse> {
    COMMUNICATION_SERVICE
        .list_communications(&req, query.into_inner())
        .await
}

pub async fn send_communication(
    req: HttpRequest,
    body: web::Json<SendCommunicationRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNICATION_SERVICE
        .send_communication(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_communications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/communications")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_communications))
                    // 手动发送有独立的限流
                    .route(
                        web::post()
                            .to(send_communication)
                            .wrap(middlewares::RateLimit::communications()),
                    ),
            ),
    );
}
