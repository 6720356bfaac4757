use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn create_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    mut assessment: CreateAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    assessment.title = assessment.title.trim().to_string();
    if assessment.title.is_empty() {
        return Ok(validation_failed("Assessment title is required"));
    }
    if !assessment.max_score.is_finite() || assessment.max_score <= 0.0 {
        return Ok(validation_failed("max_score must be greater than 0"));
    }

    if let Ok(None) = storage.get_class_by_id(assessment.class_id).await {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    match storage.create_assessment(assessment).await {
        Ok(assessment) => {
            info!(
                "Assessment {} created for class {}",
                assessment.id, assessment.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assessment,
                "Assessment created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Assessment creation failed: {e}"),
            )),
        ),
    }
}
