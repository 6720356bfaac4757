/*!
 * 定时任务共享密钥中间件
 *
 * 外部调度器以 `Authorization: Bearer <CRON_SECRET>` 调用 `/cron/<job>`。
 * 密钥不匹配、缺失或服务端未配置密钥时一律返回
 * `401 {"error":"Unauthorized"}`。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * App::new()
 *     .app_data(web::Data::new(CronSecret::new(config.cron.secret.clone())))
 *     .service(
 *         web::scope("/cron")
 *             .wrap(RequireCronSecret)
 *             .route("/generate-fees", web::post().to(generate_fees))
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::warn;

use crate::models::cron::responses::CronErrorResponse;
use crate::utils::jwt::JwtUtils;

/// 定时任务共享密钥（通过 app_data 注入）
#[derive(Clone)]
pub struct CronSecret(String);

impl CronSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// 常量时间比较；未配置密钥时永不匹配
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.is_empty() || expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[derive(Clone)]
pub struct RequireCronSecret;

fn is_authorized(req: &ServiceRequest) -> bool {
    let Some(secret) = req.app_data::<web::Data<CronSecret>>() else {
        return false;
    };
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(JwtUtils::extract_bearer)
        .is_some_and(|token| secret.matches(token))
}

impl<S, B> Transform<S, ServiceRequest> for RequireCronSecret
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCronSecretMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCronSecretMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireCronSecretMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireCronSecretMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            if !is_authorized(&req) {
                warn!("Rejected unauthorized cron call to {}", req.path());
                return Ok(req.into_response(
                    HttpResponse::Unauthorized()
                        .json(CronErrorResponse::unauthorized())
                        .map_into_right_body(),
                ));
            }

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode};

    #[test]
    fn test_secret_matching() {
        let secret = CronSecret::new("s3cret");
        assert!(secret.matches("s3cret"));
        assert!(!secret.matches("s3cre"));
        assert!(!secret.matches("S3cret"));
        assert!(!CronSecret::new("").matches(""));
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn call_with(secret: &str, header: Option<&str>) -> (StatusCode, serde_json::Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(CronSecret::new(secret)))
                .service(
                    web::scope("/cron")
                        .wrap(RequireCronSecret)
                        .route("/mark-overdue", web::post().to(ok)),
                ),
        )
        .await;

        let mut req = actix_test::TestRequest::post().uri("/cron/mark-overdue");
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }
        let resp = actix_test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body = actix_test::read_body(resp).await;
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[actix_web::test]
    async fn test_bearer_secret_required() {
        let (status, _) = call_with("s3cret", Some("Bearer s3cret")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call_with("s3cret", Some("Bearer wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));

        let (status, _) = call_with("s3cret", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call_with("s3cret", Some("s3cret")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_empty_secret_rejects_everything() {
        let (status, _) = call_with("", Some("Bearer ")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = call_with("", Some("Bearer anything")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
