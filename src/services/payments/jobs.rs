//! 管理员手动触发账单任务（与定时任务共用特权存储）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::payments::requests::GenerateFeesRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::jobs::{self, JobSettings};
use crate::storage::ServiceStorage;
use crate::utils::dates::{parse_target_month, today_utc};
use crate::utils::error_response;

fn service_storage(request: &HttpRequest) -> ServiceStorage {
    request
        .app_data::<web::Data<ServiceStorage>>()
        .map(|data| data.get_ref().clone())
        .unwrap_or_default()
}

fn job_settings(request: &HttpRequest) -> JobSettings {
    request
        .app_data::<web::Data<JobSettings>>()
        .map(|data| data.get_ref().clone())
        .unwrap_or_default()
}

pub async fn generate_fees(
    request: &HttpRequest,
    body: GenerateFeesRequest,
) -> ActixResult<HttpResponse> {
    let target_month = match body.target_month.as_deref() {
        Some(raw) => match parse_target_month(raw) {
            Ok(month) => month,
            Err(e) => return Ok(error_response(&e, ErrorCode::NotFound)),
        },
        None => today_utc(),
    };

    let storage = match service_storage(request).require() {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e, ErrorCode::NotFound)),
    };

    info!(
        "Manual fee generation for {} requested by profile {:?}",
        target_month,
        RequireJWT::extract_profile_id(request)
    );

    match jobs::generate_fees(storage.as_ref(), target_month, job_settings(request).due_day).await
    {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Monthly fees generated successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::NotFound)),
    }
}

pub async fn mark_overdue(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = match service_storage(request).require() {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e, ErrorCode::NotFound)),
    };

    info!(
        "Manual overdue marking requested by profile {:?}",
        RequireJWT::extract_profile_id(request)
    );

    match jobs::mark_overdue(storage.as_ref(), today_utc()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Overdue payments marked successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::NotFound)),
    }
}
