use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::middlewares::{RateLimit, RequireCronSecret};
use crate::services::CronService;

// 懒加载的全局 CRON_SERVICE 实例
static CRON_SERVICE: Lazy<CronService> = Lazy::new(CronService::new_lazy);

pub async fn generate_fees(req: HttpRequest, body: web::Bytes) -> ActixResult<HttpResponse> {
    CRON_SERVICE.generate_fees(&req, body).await
}

pub async fn mark_overdue(req: HttpRequest) -> ActixResult<HttpResponse> {
    CRON_SERVICE.mark_overdue(&req).await
}

pub async fn send_reminders(req: HttpRequest, body: web::Bytes) -> ActixResult<HttpResponse> {
    CRON_SERVICE.send_reminders(&req, body).await
}

// 配置路由
pub fn configure_cron_routes(cfg: &mut web::ServiceConfig) {
    configure_cron_routes_with(cfg, AppConfig::get().cron.requests_per_minute);
}

pub fn configure_cron_routes_with(cfg: &mut web::ServiceConfig, requests_per_minute: u32) {
    cfg.service(
        web::scope("/cron")
            .wrap(RequireCronSecret)
            // 限流在外层，密钥错误的请求同样计数
            .wrap(RateLimit::cron(requests_per_minute))
            .route("/generate-fees", web::post().to(generate_fees))
            .route("/mark-overdue", web::post().to(mark_overdue))
            .route("/send-reminders", web::post().to(send_reminders)),
    );
}
