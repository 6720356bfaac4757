pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 选课列表
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        query: EnrollmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, request, query).await
    }

    // 学生选课
    pub async fn create_enrollment(
        &self,
        request: &HttpRequest,
        enrollment: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_enrollment(self, request, enrollment).await
    }

    // 更新选课状态或自定义学费
    pub async fn update_enrollment(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment(self, request, id, update).await
    }

    // 退课
    pub async fn delete_enrollment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_enrollment(self, request, id).await
    }
}

pub(crate) fn check_custom_fee(custom_fee: Option<f64>) -> Result<(), &'static str> {
    match custom_fee {
        Some(fee) if !fee.is_finite() || fee < 0.0 => {
            Err("Custom fee must be a non-negative number")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::enrollments as handlers;
    use crate::storage::testing::{memory_storage, seed_class, seed_student, student_request};
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_enroll_twice_conflicts() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, student_request("E-1")).await;
        let class = seed_class(&storage, "ENG-1", 40.0).await;

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/enrollments", web::post().to(handlers::create_enrollment)),
        )
        .await;

        let body = json!({"student_id": student.id, "class_id": class.id});
        let req = actix_test::TestRequest::post()
            .uri("/enrollments")
            .set_json(&body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(resp).await;
        assert_eq!(created["data"]["status"], "active");

        let req = actix_test::TestRequest::post()
            .uri("/enrollments")
            .set_json(&body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_enroll_unknown_class() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, student_request("E-2")).await;

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/enrollments", web::post().to(handlers::create_enrollment)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/enrollments")
            .set_json(json!({"student_id": student.id, "class_id": 4242}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_custom_fee_rules() {
        assert!(check_custom_fee(None).is_ok());
        assert!(check_custom_fee(Some(0.0)).is_ok());
        assert!(check_custom_fee(Some(-0.5)).is_err());
    }
}
