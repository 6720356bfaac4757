use actix_web::{App, http::StatusCode, test, web};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::middlewares::CronSecret;
use crate::models::payments::requests::CreatePaymentRequest;
use crate::routes::configure_cron_routes_with;
use crate::services::jobs::JobSettings;
use crate::services::notifications::{Notifier, fakes::RecordingEmail};
use crate::storage::testing::{
    memory_storage, seed_class, seed_enrollment, seed_student, student_request,
};
use crate::storage::{ServiceStorage, Storage};
use crate::utils::dates::today_utc;

const SECRET: &str = "cron-secret";

macro_rules! cron_app {
    ($storage:expr, $notifier:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(CronSecret::new(SECRET)))
                .app_data(web::Data::new(ServiceStorage::new($storage)))
                .app_data(web::Data::new(JobSettings::default()))
                .app_data(web::Data::new($notifier))
                .configure(|cfg| configure_cron_routes_with(cfg, 10_000)),
        )
        .await
    };
}

/// 发送带 Bearer 令牌的 POST 请求，返回状态码与 JSON 响应体
macro_rules! call {
    ($app:expr, $path:expr, $token:expr, $body:expr $(,)?) => {{
        let mut req = test::TestRequest::post()
            .uri($path)
            .insert_header(("Authorization", format!("Bearer {}", $token)));
        let body: Option<Value> = $body;
        if let Some(body) = body {
            req = req.set_json(body);
        }
        let resp = test::call_service(&$app, req.to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }};
}

async fn seed_active_enrollments(storage: &Arc<dyn Storage>, count: usize) {
    let class = seed_class(storage, "VIOLIN", 75.0).await;
    for i in 0..count {
        let student = seed_student(storage, student_request(&format!("V{i:02}"))).await;
        seed_enrollment(storage, student.id, class.id, None).await;
    }
}

#[actix_web::test]
async fn test_generate_fees_requires_secret() {
    let storage = memory_storage().await;
    let app = cron_app!(Some(storage), Notifier::default());

    let (status, body) = call!(
        app,
        "/cron/generate-fees",
        "wrong",
        Some(json!({"targetMonth": "2025-03-01"})),
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized"}));
}

#[actix_web::test]
async fn test_generate_fees_for_target_month() {
    let storage = memory_storage().await;
    seed_active_enrollments(&storage, 10).await;
    let app = cron_app!(Some(storage.clone()), Notifier::default());

    let (status, body) = call!(
        app,
        "/cron/generate-fees",
        SECRET,
        Some(json!({"targetMonth": "2025-03-01"})),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(10));

    // 同一月份再次执行不新增
    let (status, body) = call!(
        app,
        "/cron/generate-fees",
        SECRET,
        Some(json!({"targetMonth": "2025-03"})),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
}

#[actix_web::test]
async fn test_generate_fees_rejects_bad_month() {
    let storage = memory_storage().await;
    let app = cron_app!(Some(storage), Notifier::default());

    let (status, body) = call!(
        app,
        "/cron/generate-fees",
        SECRET,
        Some(json!({"targetMonth": "03/2025"})),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_missing_service_database_is_configuration_error() {
    let app = cron_app!(None, Notifier::default());

    let (status, body) = call!(app, "/cron/mark-overdue", SECRET, None);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Service database URL not configured"}));
}

#[actix_web::test]
async fn test_mark_overdue_reports_count() {
    let storage = memory_storage().await;
    let class = seed_class(&storage, "DRUMS", 50.0).await;
    let student = seed_student(&storage, student_request("D1")).await;
    let enrollment = seed_enrollment(&storage, student.id, class.id, None).await;
    storage
        .create_payment(CreatePaymentRequest {
            student_id: student.id,
            enrollment_id: enrollment.id,
            amount: 50.0,
            payment_month: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date"),
            notes: None,
        })
        .await
        .expect("payment created");

    let app = cron_app!(Some(storage), Notifier::default());
    let (status, body) = call!(app, "/cron/mark-overdue", SECRET, None);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(1));
}

#[actix_web::test]
async fn test_send_reminders_without_sms_provider() {
    let storage = memory_storage().await;
    let class = seed_class(&storage, "FLUTE", 65.0).await;
    let mut student = student_request("R1");
    student.guardian_email = Some("guardian@example.com".to_string());
    student.guardian_phone = Some("+15550003333".to_string());
    let student = seed_student(&storage, student).await;
    let enrollment = seed_enrollment(&storage, student.id, class.id, None).await;
    let today = today_utc();
    storage
        .create_payment(CreatePaymentRequest {
            student_id: student.id,
            enrollment_id: enrollment.id,
            amount: 65.0,
            payment_month: today,
            due_date: today + chrono::Duration::days(3),
            notes: None,
        })
        .await
        .expect("payment created");

    let email = Arc::new(RecordingEmail::default());
    let app = cron_app!(Some(storage), Notifier::new(Some(email.clone()), None));

    let (status, body) = call!(
        app,
        "/cron/send-reminders",
        SECRET,
        Some(json!({"daysBeforeDue": 3})),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["emailsSent"], json!(1));
    assert_eq!(body["smsSent"], json!(0));
    assert_eq!(body["paymentsProcessed"], json!(1));
    assert!(body.get("errors").is_none());
    assert_eq!(email.sent_to(), vec!["guardian@example.com".to_string()]);
}

#[actix_web::test]
async fn test_send_reminders_validates_days() {
    let storage = memory_storage().await;
    let app = cron_app!(Some(storage), Notifier::default());

    let (status, _) = call!(
        app,
        "/cron/send-reminders",
        SECRET,
        Some(json!({"daysBeforeDue": 90})),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(
        app,
        "/cron/send-reminders",
        SECRET,
        Some(json!({"daysBeforeDue": "soon"})),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_wrong_secret_attempts_are_rate_limited() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(CronSecret::new(SECRET)))
            .app_data(web::Data::new(ServiceStorage::default()))
            .app_data(web::Data::new(JobSettings::default()))
            .app_data(web::Data::new(Notifier::default()))
            .configure(|cfg| configure_cron_routes_with(cfg, 2)),
    )
    .await;

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/cron/mark-overdue")
            .insert_header(("X-Forwarded-For", "203.0.113.77"))
            .insert_header(("Authorization", "Bearer guessed-secret"))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::UNAUTHORIZED,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS
        ]
    );
}
