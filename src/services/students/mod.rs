pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{validate_optional_email, validate_optional_phone};

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 创建学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student).await
    }

    // 获取学生详情
    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, request, id).await
    }

    // 更新学生
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, update).await
    }

    // 删除学生
    pub async fn delete_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, id).await
    }
}

/// 学生与监护人的联系方式校验（空字符串视为未填写）
pub(crate) fn validate_contacts(
    email: Option<&str>,
    phone: Option<&str>,
    guardian_email: Option<&str>,
    guardian_phone: Option<&str>,
) -> Result<(), String> {
    validate_optional_email(email).map_err(|e| format!("email: {e}"))?;
    validate_optional_phone(phone).map_err(|e| format!("phone: {e}"))?;
    validate_optional_email(guardian_email).map_err(|e| format!("guardian_email: {e}"))?;
    validate_optional_phone(guardian_phone).map_err(|e| format!("guardian_phone: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::students as handlers;
    use crate::storage::testing::{memory_storage, student_request};
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode, web};
    use serde_json::{Value, json};

    #[test]
    fn test_validate_contacts() {
        assert!(validate_contacts(None, None, None, None).is_ok());
        assert!(validate_contacts(Some(""), Some(" "), None, None).is_ok());
        assert!(validate_contacts(Some("a@b.co"), Some("+1 555-0100"), None, None).is_ok());

        let err = validate_contacts(None, None, Some("not-an-email"), None).unwrap_err();
        assert!(err.starts_with("guardian_email"));
        let err = validate_contacts(None, Some("abc"), None, None).unwrap_err();
        assert!(err.starts_with("phone"));
    }

    #[actix_web::test]
    async fn test_create_student_rejects_duplicate_code() {
        let storage = memory_storage().await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/students", web::post().to(handlers::create_student)),
        )
        .await;

        let body = json!({"student_code": "S-001", "full_name": "Ada Lovelace"});
        let req = actix_test::TestRequest::post()
            .uri("/students")
            .set_json(&body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(resp).await;
        assert_eq!(created["data"]["status"], "active");

        let req = actix_test::TestRequest::post()
            .uri("/students")
            .set_json(&body)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_create_student_validates_contacts() {
        let storage = memory_storage().await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .route("/students", web::post().to(handlers::create_student)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/students")
            .set_json(json!({
                "student_code": "S-002",
                "full_name": "Grace Hopper",
                "guardian_email": "nope"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = actix_test::TestRequest::post()
            .uri("/students")
            .set_json(json!({"student_code": "bad code!", "full_name": "Grace Hopper"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_and_delete_student() {
        let storage = memory_storage().await;
        let student = storage
            .create_student(student_request("S-003"))
            .await
            .expect("student created");

        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(storage.clone())).service(
                web::resource("/students/{id}")
                    .route(web::get().to(handlers::get_student))
                    .route(web::delete().to(handlers::delete_student)),
            ),
        )
        .await;

        let uri = format!("/students/{}", student.id);
        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp =
            actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
