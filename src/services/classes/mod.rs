pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::models::classes::requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    // 创建班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 获取班级详情
    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    // 删除班级
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }
}

/// 学费与容量校验
pub(crate) fn check_fee_and_capacity(
    monthly_fee: Option<f64>,
    capacity: Option<i32>,
) -> Result<(), &'static str> {
    if let Some(fee) = monthly_fee
        && (!fee.is_finite() || fee < 0.0)
    {
        return Err("Monthly fee must be a non-negative number");
    }
    if let Some(capacity) = capacity
        && capacity <= 0
    {
        return Err("Capacity must be greater than 0");
    }
    Ok(())
}

/// 授课教师必须存在
pub(crate) async fn check_class_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(teacher_id) = teacher_id else {
        return Ok(());
    };

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => {
            error!("Failed to get teacher by id: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching teacher",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::classes as handlers;
    use crate::storage::testing::{memory_storage, seed_class};
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode, web};
    use serde_json::{Value, json};

    #[test]
    fn test_fee_and_capacity_rules() {
        assert!(check_fee_and_capacity(Some(0.0), None).is_ok());
        assert!(check_fee_and_capacity(Some(120.5), Some(30)).is_ok());
        assert!(check_fee_and_capacity(Some(-1.0), None).is_err());
        assert!(check_fee_and_capacity(Some(f64::NAN), None).is_err());
        assert!(check_fee_and_capacity(None, Some(0)).is_err());
    }

    #[actix_web::test]
    async fn test_create_class_with_unknown_teacher() {
        let storage = memory_storage().await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/classes", web::post().to(handlers::create_class)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/classes")
            .set_json(json!({
                "code": "MATH-1",
                "name": "Algebra",
                "monthly_fee": 80.0,
                "teacher_id": 999
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_class_fee() {
        let storage = memory_storage().await;
        let class = seed_class(&storage, "PHY-1", 50.0).await;

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/classes/{id}", web::put().to(handlers::update_class)),
        )
        .await;

        let uri = format!("/classes/{}", class.id);
        let req = actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"monthly_fee": 65.0}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["monthly_fee"], 65.0);

        let req = actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"monthly_fee": -5.0}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
