use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::entities::UserRole;
use crate::models::tutorials::requests::{
    CreateTutorialRequest, TutorialListQuery, UpdateTutorialRequest, UpsertProgressRequest,
};
use crate::services::TutorialService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TUTORIAL_SERVICE 实例
static TUTORIAL_SERVICE: Lazy<TutorialService> = Lazy::new(TutorialService::new_lazy);

pub async fn list_tutorials(
    req: HttpRequest,
    query: web::Query<TutorialListQuery>,
) -> ActixResult<HttpResponse> {
    TUTORIAL_SERVICE
        .list_tutorials(&req, query.into_inner())
        .await
}

pub async fn create_tutorial(
    req: HttpRequest,
    body: web::Json<CreateTutorialRequest>,
) -> ActixResult<HttpResponse> {
    TUTORIAL_SERVICE
        .create_tutorial(&req, body.into_inner())
        .await
}

pub async fn update_tutorial(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTutorialRequest>,
) -> ActixResult<HttpResponse> {
    TUTORIAL_SERVICE
        .update_tutorial(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_tutorial(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TUTORIAL_SERVICE.delete_tutorial(&req, id.0).await
}

pub async fn list_progress(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TUTORIAL_SERVICE.list_progress(&req, id.0).await
}

pub async fn upsert_progress(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpsertProgressRequest>,
) -> ActixResult<HttpResponse> {
    TUTORIAL_SERVICE
        .upsert_progress(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_tutorials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tutorials")
            .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_tutorials))
                    .route(web::post().to(create_tutorial)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_tutorial))
                    .route(web::delete().to(delete_tutorial)),
            )
            .service(
                web::resource("/{id}/progress")
                    .route(web::get().to(list_progress))
                    .route(web::post().to(upsert_progress)),
            ),
    );
}
