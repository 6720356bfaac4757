use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime, system::responses::HealthResponse};
use crate::services::notifications::Notifier;
use crate::storage::ServiceStorage;

pub async fn health(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or_default();

    let notifier = request.app_data::<web::Data<Notifier>>();
    let (system_name, environment) = request
        .app_data::<web::Data<AppConfig>>()
        .map(|config| (config.app.system_name.clone(), config.app.environment.clone()))
        .unwrap_or_else(|| ("EduDesk".to_string(), "unknown".to_string()));

    let response = HealthResponse {
        status: "ok".to_string(),
        system_name,
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment,
        uptime_seconds,
        email_enabled: notifier.is_some_and(|n| n.has_email()),
        sms_enabled: notifier.is_some_and(|n| n.has_sms()),
        jobs_enabled: request
            .app_data::<web::Data<ServiceStorage>>()
            .is_some_and(|s| s.0.is_some()),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}

#[cfg(test)]
mod tests {
    use crate::routes::system as handlers;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_without_app_data() {
        let app = test::init_service(
            App::new().route("/health", web::get().to(handlers::health)),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["jobs_enabled"], false);
    }
}
