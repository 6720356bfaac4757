pub mod create;
pub mod delete;
pub mod grades;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{
    AssessmentListQuery, CreateAssessmentRequest, GradeEntry, UpsertGradesRequest,
};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_assessments(
        &self,
        request: &HttpRequest,
        query: AssessmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, request, query).await
    }

    pub async fn create_assessment(
        &self,
        request: &HttpRequest,
        assessment: CreateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, request, assessment).await
    }

    pub async fn delete_assessment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, request, id).await
    }

    // 某次测评的成绩
    pub async fn list_grades(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        grades::list_grades(self, request, id).await
    }

    // 批量录入成绩
    pub async fn upsert_grades(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpsertGradesRequest,
    ) -> ActixResult<HttpResponse> {
        grades::upsert_grades(self, request, id, body).await
    }
}

/// 分数必须落在 [0, max_score]
pub(crate) fn check_scores(grades: &[GradeEntry], max_score: f64) -> Result<(), String> {
    for grade in grades {
        if !grade.score.is_finite() || grade.score < 0.0 || grade.score > max_score {
            return Err(format!(
                "Score {} for student {} is outside 0..={}",
                grade.score, grade.student_id, max_score
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::assessments as handlers;
    use crate::storage::testing::{memory_storage, seed_class, seed_student, student_request};
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode, web};
    use serde_json::{Value, json};

    fn entry(student_id: i64, score: f64) -> GradeEntry {
        GradeEntry {
            student_id,
            score,
            remarks: None,
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(check_scores(&[entry(1, 0.0), entry(2, 50.0)], 50.0).is_ok());
        assert!(check_scores(&[entry(1, 50.5)], 50.0).is_err());
        assert!(check_scores(&[entry(1, -1.0)], 50.0).is_err());
    }

    #[actix_web::test]
    async fn test_grades_out_of_range_rejected() {
        let storage = memory_storage().await;
        let class = seed_class(&storage, "CHEM-1", 0.0).await;
        let student = seed_student(&storage, student_request("G-1")).await;
        let assessment = storage
            .create_assessment(CreateAssessmentRequest {
                class_id: class.id,
                title: "Midterm".to_string(),
                kind: crate::models::assessments::entities::AssessmentKind::Exam,
                max_score: 20.0,
                assessment_date: None,
            })
            .await
            .expect("assessment created");

        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(storage.clone())).service(
                web::resource("/assessments/{id}/grades")
                    .route(web::get().to(handlers::list_grades))
                    .route(web::post().to(handlers::upsert_grades)),
            ),
        )
        .await;
        let uri = format!("/assessments/{}/grades", assessment.id);

        let req = actix_test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({"grades": [{"student_id": student.id, "score": 25.0}]}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = actix_test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({"grades": [{"student_id": student.id, "score": 18.5}]}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["score"], 18.5);
    }
}
