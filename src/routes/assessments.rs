use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{
    AssessmentListQuery, CreateAssessmentRequest, UpsertGradesRequest,
};
use crate::models::profiles::entities::UserRole;
use crate::services::AssessmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ASSESSMENT_SERVICE 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(&req, query.into_inner())
        .await
}

pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(&req, body.into_inner())
        .await
}

pub async fn delete_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_assessment(&req, id.0).await
}

pub async fn list_grades(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.list_grades(&req, id.0).await
}

pub async fn upsert_grades(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpsertGradesRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .upsert_grades(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireRole::new_any(UserRole::academic_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assessments))
                    .route(web::post().to(create_assessment)),
            )
            .service(web::resource("/{id}").route(web::delete().to(delete_assessment)))
            .service(
                web::resource("/{id}/grades")
                    .route(web::get().to(list_grades))
                    .route(web::post().to(upsert_grades)),
            ),
    );
}
