use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payments::requests::{
    CreatePaymentRequest, GenerateFeesRequest, MarkPaidRequest, PaymentListQuery,
    UpdatePaymentStatusRequest,
};
use crate::models::profiles::entities::UserRole;
use crate::services::PaymentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 PAYMENT_SERVICE 实例
static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

// HTTP处理程序
pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(&req, query.into_inner()).await
}

pub async fn create_payment(
    req: HttpRequest,
    body: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.create_payment(&req, body.into_inner()).await
}

pub async fn get_payment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_payment(&req, id.0).await
}

pub async fn mark_paid(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<MarkPaidRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.mark_paid(&req, id.0, body.into_inner()).await
}

pub async fn update_status(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePaymentStatusRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .update_status(&req, id.0, body.into_inner())
        .await
}

pub async fn generate_fees(
    req: HttpRequest,
    body: Option<web::Json<GenerateFeesRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    PAYMENT_SERVICE.generate_fees(&req, body).await
}

pub async fn mark_overdue(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.mark_overdue(&req).await
}

// 配置路由
pub fn configure_payments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_payments))
                    .route(web::post().to(create_payment))
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
            )
            // 手动触发账单任务，仅管理员
            .service(
                web::resource("/generate")
                    .route(web::post().to(generate_fees))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            )
            .service(
                web::resource("/mark-overdue")
                    .route(web::post().to(mark_overdue))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_payment))
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
            )
            .service(
                web::resource("/{id}/mark-paid")
                    .route(web::post().to(mark_paid))
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
            )
            .service(
                web::resource("/{id}/status")
                    .route(web::put().to(update_status))
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
            ),
    );
}
