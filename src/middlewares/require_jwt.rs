/*!
 * JWT 认证中间件
 *
 * 令牌由外部认证服务签发（HS256），此中间件只负责验证，
 * 并把令牌 `sub` 对应的用户档案放入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new()
 *     .service(
 *         web::scope("/api/v1/students")
 *             .wrap(RequireJWT)
 *             .route("", web::get().to(list_students))
 *     )
 * ```
 *
 * 在处理程序中提取档案：
 *
 * ```rust,ignore
 * let profile = RequireJWT::extract_profile(&req);
 * let profile_id = RequireJWT::extract_profile_id(&req);
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件验证签名、过期时间与受众
 * 3. 先查缓存，未命中时通过 `auth_user_id` 读取档案并写入缓存
 * 4. 令牌无效返回 401；令牌有效但没有档案返回 403
 */

use crate::cache::{ObjectCache, get_json, insert_json};
use crate::models::ErrorCode;
use crate::models::profiles::entities::Profile;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败原因
enum AuthFailure {
    Unauthorized(String),
    NotProvisioned,
    Internal(&'static str),
}

// 辅助函数：提取并验证 JWT，解析出档案
async fn extract_and_resolve_profile(req: &ServiceRequest) -> Result<Profile, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtUtils::extract_bearer)
        .ok_or_else(|| AuthFailure::Unauthorized("Missing or invalid Authorization header".into()))?;

    let claims = JwtUtils::verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid JWT token".into())
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    let cache_key = format!("profile:{}", claims.sub);
    if let Some(ref cache) = cache
        && let Some(profile) = get_json::<Profile>(cache.as_ref(), &cache_key).await
    {
        return Ok(profile);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::Internal("Storage not configured"))?;

    let profile = storage
        .get_profile_by_auth_user_id(&claims.sub)
        .await
        .map_err(|e| {
            error!("Failed to load profile for {}: {}", claims.sub, e);
            AuthFailure::Internal("Failed to retrieve profile")
        })?
        .ok_or(AuthFailure::NotProvisioned)?;

    if let Some(cache) = cache {
        insert_json(cache.as_ref(), cache_key, &profile).await;
    }

    Ok(profile)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_resolve_profile(&req).await {
                Ok(profile) => {
                    debug!("JWT authentication successful for profile: {}", profile.id);
                    req.extensions_mut().insert(profile);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    let (status, code, message) = match failure {
                        AuthFailure::Unauthorized(err) => (
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            format!("Unauthorized: {err}"),
                        ),
                        AuthFailure::NotProvisioned => (
                            StatusCode::FORBIDDEN,
                            ErrorCode::ProfileNotProvisioned,
                            "No profile is provisioned for this account".to_string(),
                        ),
                        AuthFailure::Internal(err) => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            err.to_string(),
                        ),
                    };
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(status, code, &message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取档案信息
impl RequireJWT {
    /// 从请求扩展中提取档案
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_profile(req: &actix_web::HttpRequest) -> Option<Profile> {
        req.extensions().get::<Profile>().cloned()
    }

    /// 从请求扩展中提取档案ID
    pub fn extract_profile_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Profile>().map(|profile| profile.id)
    }
}
