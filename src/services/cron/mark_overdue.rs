use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CronService, job_error_response};
use crate::models::cron::responses::CronCountResponse;
use crate::services::jobs;
use crate::utils::dates::today_utc;

pub async fn mark_overdue(service: &CronService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = match service.get_service_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(job_error_response("mark-overdue", &e)),
    };

    match jobs::mark_overdue(storage.as_ref(), today_utc()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(CronCountResponse::new(
            format!("Marked {} payments as overdue", result.count),
            result.count,
        ))),
        Err(e) => Ok(job_error_response("mark-overdue", &e)),
    }
}
