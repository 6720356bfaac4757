pub mod list;
pub mod mark;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::attendance::requests::{AttendanceEntry, AttendanceQuery, MarkAttendanceRequest};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 查询某班级某天的考勤
    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    // 批量登记考勤
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        body: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, body).await
    }
}

/// 条目不能为空，同一学生不能出现两次
pub(crate) fn check_entries(entries: &[AttendanceEntry]) -> Result<(), String> {
    if entries.is_empty() {
        return Err("At least one attendance entry is required".to_string());
    }
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.student_id) {
            return Err(format!("Duplicate entry for student {}", entry.student_id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::attendance as handlers;
    use crate::storage::testing::{
        memory_storage, seed_class, seed_enrollment, seed_student, student_request,
    };
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_mark_attendance_overwrites_same_day() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, student_request("A-1")).await;
        let class = seed_class(&storage, "BIO-1", 30.0).await;
        seed_enrollment(&storage, student.id, class.id, None).await;

        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(storage.clone())).service(
                web::resource("/attendance")
                    .route(web::get().to(handlers::list_attendance))
                    .route(web::post().to(handlers::mark_attendance)),
            ),
        )
        .await;

        for status in ["absent", "late"] {
            let req = actix_test::TestRequest::post()
                .uri("/attendance")
                .set_json(json!({
                    "class_id": class.id,
                    "attendance_date": "2025-03-10",
                    "entries": [{"student_id": student.id, "status": status}]
                }))
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = actix_test::TestRequest::get()
            .uri(&format!("/attendance?class_id={}&date=2025-03-10", class.id))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        let records = body["data"].as_array().expect("records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["status"], "late");
    }

    #[actix_web::test]
    async fn test_list_requires_class_and_date() {
        let storage = memory_storage().await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/attendance", web::get().to(handlers::list_attendance)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/attendance?class_id=1")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        use crate::models::attendance::entities::AttendanceStatus;

        let entry = |student_id| AttendanceEntry {
            student_id,
            status: AttendanceStatus::Present,
            notes: None,
        };
        assert!(check_entries(&[]).is_err());
        assert!(check_entries(&[entry(1), entry(2)]).is_ok());
        assert!(check_entries(&[entry(1), entry(1)]).is_err());
    }
}
