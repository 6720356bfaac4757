pub mod list;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::communications::requests::{CommunicationListQuery, SendCommunicationRequest};
use crate::services::notifications::Notifier;
use crate::storage::Storage;

pub struct CommunicationService {
    storage: Option<Arc<dyn Storage>>,
}

impl CommunicationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_notifier(&self, request: &HttpRequest) -> Notifier {
        request
            .app_data::<web::Data<Notifier>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_default()
    }

    // 通讯记录
    pub async fn list_communications(
        &self,
        request: &HttpRequest,
        query: CommunicationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_communications(self, request, query).await
    }

    // 手动发送
    pub async fn send_communication(
        &self,
        request: &HttpRequest,
        body: SendCommunicationRequest,
    ) -> ActixResult<HttpResponse> {
        send::send_communication(self, request, body).await
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::communications as handlers;
    use crate::services::notifications::{
        Notifier,
        fakes::{RecordingEmail, RecordingSms},
    };
    use crate::storage::testing::{memory_storage, seed_student, student_request};
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_send_prefers_guardian_and_logs() {
        let storage = memory_storage().await;
        let mut req = student_request("C-1");
        req.email = Some("student@example.com".to_string());
        req.guardian_email = Some("parent@example.com".to_string());
        req.phone = Some("+15550001111".to_string());
        let student = seed_student(&storage, req).await;

        let email = Arc::new(RecordingEmail::default());
        let sms = Arc::new(RecordingSms::default());
        let notifier = Notifier::new(Some(email.clone()), Some(sms.clone()));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(notifier))
                .route("/communications", web::post().to(handlers::send_communication)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/communications")
            .set_json(json!({
                "student_id": student.id,
                "channel": "both",
                "subject": "Class cancelled",
                "message": "No class on Friday."
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "sent");
        assert_eq!(body["data"]["kind"], "manual");
        assert_eq!(body["data"]["channel"], "both");

        assert_eq!(email.sent_to(), vec!["parent@example.com".to_string()]);
        assert_eq!(sms.sent_to(), vec!["+15550001111".to_string()]);
    }

    #[actix_web::test]
    async fn test_send_without_provider_is_unavailable() {
        let storage = memory_storage().await;
        let mut req = student_request("C-2");
        req.email = Some("student@example.com".to_string());
        let student = seed_student(&storage, req).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(Notifier::default()))
                .route("/communications", web::post().to(handlers::send_communication)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/communications")
            .set_json(json!({
                "student_id": student.id,
                "channel": "email",
                "message": "Hello"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_failed_delivery_is_logged() {
        let storage = memory_storage().await;
        let mut req = student_request("C-3");
        req.email = Some("student@example.com".to_string());
        let student = seed_student(&storage, req).await;

        let notifier = Notifier::new(Some(Arc::new(RecordingEmail::failing())), None);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(notifier))
                .route("/communications", web::post().to(handlers::send_communication)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/communications")
            .set_json(json!({
                "student_id": student.id,
                "channel": "email",
                "message": "Hello"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let logs = storage
            .list_communication_logs_with_pagination(
                serde_json::from_value(json!({"student_id": student.id})).expect("query"),
            )
            .await
            .expect("logs");
        assert_eq!(logs.items.len(), 1);
        assert_eq!(logs.items[0].status.as_str(), "failed");
    }
}
