use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssessmentService, check_scores};
use crate::models::assessments::{entities::Assessment, requests::UpsertGradesRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{is_foreign_key_violation, validation_failed};
use crate::storage::Storage;

async fn find_assessment(storage: &dyn Storage, id: i64) -> Result<Assessment, HttpResponse> {
    match storage.get_assessment_by_id(id).await {
        Ok(Some(assessment)) => Ok(assessment),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "Assessment not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get assessment: {e}"),
            )),
        ),
    }
}

pub async fn list_grades(
    service: &AssessmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(resp) = find_assessment(storage.as_ref(), id).await {
        return Ok(resp);
    }

    match storage.list_grades(id).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve grades: {e}"),
            )),
        ),
    }
}

pub async fn upsert_grades(
    service: &AssessmentService,
    request: &HttpRequest,
    id: i64,
    body: UpsertGradesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if body.grades.is_empty() {
        return Ok(validation_failed("At least one grade is required"));
    }

    let assessment = match find_assessment(storage.as_ref(), id).await {
        Ok(assessment) => assessment,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = check_scores(&body.grades, assessment.max_score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeOutOfRange,
            msg,
        )));
    }

    match storage.upsert_grades(id, body.grades).await {
        Ok(grades) => {
            info!("Recorded {} grades for assessment {}", grades.len(), id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                grades,
                "Grades recorded successfully",
            )))
        }
        Err(e) if is_foreign_key_violation(&e) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to record grades: {e}"),
            )),
        ),
    }
}
