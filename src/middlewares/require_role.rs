/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证用户是否具有特定角色权限。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::profiles::entities::UserRole;
 *
 * App::new()
 *     .service(
 *         web::scope("/api/v1/payments")
 *             .wrap(RequireRole::new_any(UserRole::staff_roles()))  // 再验证角色
 *             .wrap(RequireJWT)  // 先验证JWT（最后注册的中间件最先执行）
 *             .route("", web::get().to(list_payments))
 *     )
 * ```
 *
 * 单一角色：
 *
 * ```rust,ignore
 * .wrap(RequireRole::new(&UserRole::Admin))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    profiles::entities::{Profile, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
    require_all: bool, // true表示需要所有角色，false表示任一角色即可
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![*role],
            require_all: true,
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
            require_all: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
            require_all: self.require_all,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<UserRole>,
    require_all: bool,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required_roles = self.required_roles.clone();
        let require_all = self.require_all;

        Box::pin(async move {
            // 从请求扩展中获取档案
            let profile = req.extensions().get::<Profile>().cloned();

            match profile {
                Some(profile) => {
                    let user_role = profile.role;
                    let has_permission = if require_all {
                        // 需要所有角色（通常用于单一角色验证）
                        required_roles.iter().all(|role| *role == user_role)
                    } else {
                        // 需要任一角色
                        required_roles.iter().any(|role| *role == user_role)
                    };

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for profile {} (role: {}). Required roles: {:?}",
                            profile.id, user_role, required_roles
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Role check failed: no profile found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, dev::Service as _, test, web};

    fn profile(role: UserRole) -> Profile {
        let now = chrono::Utc::now();
        Profile {
            id: 7,
            auth_user_id: "auth-7".to_string(),
            email: "user@example.com".to_string(),
            full_name: None,
            role,
            institute_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_role_check() {
        for (role, expected) in [
            (UserRole::Admin, StatusCode::OK),
            (UserRole::Staff, StatusCode::OK),
            (UserRole::Teacher, StatusCode::FORBIDDEN),
        ] {
            let app = test::init_service(
                App::new().service(
                    web::scope("/api")
                        .wrap(RequireRole::new_any(UserRole::staff_roles()))
                        .wrap_fn(move |req, srv| {
                            req.extensions_mut().insert(profile(role));
                            srv.call(req)
                        })
                        .route("/payments", web::get().to(ok)),
                ),
            )
            .await;

            let req = test::TestRequest::get().uri("/api/payments").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "role {role}");
        }
    }

    #[actix_web::test]
    async fn test_missing_profile_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(RequireRole::new(&UserRole::Admin))
                    .route("/profiles", web::get().to(ok)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/profiles").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
