use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest};
use crate::models::profiles::entities::UserRole;
use crate::models::sessions::requests::{CreateSessionRequest, SessionListQuery};
use crate::services::{ClassService, SessionService};
use crate::utils::SafeIDI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static SESSION_SERVICE: Lazy<SessionService> = Lazy::new(SessionService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassListQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeIDI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn list_sessions(
    req: HttpRequest,
    class_id: SafeIDI64,
    query: web::Query<SessionListQuery>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .list_sessions(&req, class_id.0, query.into_inner())
        .await
}

pub async fn create_session(
    req: HttpRequest,
    class_id: SafeIDI64,
    body: web::Json<CreateSessionRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .create_session(&req, class_id.0, body.into_inner())
        .await
}

pub async fn delete_session(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.delete_session(&req, id.0).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_classes)
                            // 教师可以查看班级
                            .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            // 课时安排
            .service(
                web::resource("/{id}/sessions")
                    .route(web::get().to(list_sessions))
                    .route(web::post().to(create_session))
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/sessions")
            .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::delete().to(delete_session)),
    );
}
