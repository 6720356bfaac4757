pub mod create;
pub mod delete;
pub mod list;
pub mod progress;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::tutorials::requests::{
    CreateTutorialRequest, TutorialListQuery, UpdateTutorialRequest, UpsertProgressRequest,
};
use crate::storage::Storage;

pub struct TutorialService {
    storage: Option<Arc<dyn Storage>>,
}

impl TutorialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_tutorials(
        &self,
        request: &HttpRequest,
        query: TutorialListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_tutorials(self, request, query).await
    }

    pub async fn create_tutorial(
        &self,
        request: &HttpRequest,
        tutorial: CreateTutorialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_tutorial(self, request, tutorial).await
    }

    pub async fn update_tutorial(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateTutorialRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_tutorial(self, request, id, update).await
    }

    pub async fn delete_tutorial(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_tutorial(self, request, id).await
    }

    // 学习进度
    pub async fn list_progress(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        progress::list_progress(self, request, id).await
    }

    pub async fn upsert_progress(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpsertProgressRequest,
    ) -> ActixResult<HttpResponse> {
        progress::upsert_progress(self, request, id, body).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::tutorials::requests::CreateTutorialRequest;
    use crate::routes::tutorials as handlers;
    use crate::storage::testing::{memory_storage, seed_student, student_request};
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_progress_bounds_and_completion() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, student_request("T-1")).await;
        let tutorial = storage
            .create_tutorial(CreateTutorialRequest {
                class_id: None,
                title: "Fractions".to_string(),
                description: None,
                content_url: None,
                published: true,
            })
            .await
            .expect("tutorial created");

        let app = test::init_service(
            App::new().app_data(web::Data::new(storage.clone())).service(
                web::resource("/tutorials/{id}/progress")
                    .route(web::get().to(handlers::list_progress))
                    .route(web::post().to(handlers::upsert_progress)),
            ),
        )
        .await;
        let uri = format!("/tutorials/{}/progress", tutorial.id);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({"student_id": student.id, "progress_percent": 120}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({"student_id": student.id, "progress_percent": 100}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(!body["data"]["completed_at"].is_null());

        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_progress_for_missing_tutorial() {
        let storage = memory_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/tutorials/{id}/progress", web::get().to(handlers::list_progress)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/tutorials/77/progress")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
