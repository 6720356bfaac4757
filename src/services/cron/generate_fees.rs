use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{CronService, job_error_response, parse_optional_body};
use crate::models::cron::{requests::GenerateFeesBody, responses::CronCountResponse};
use crate::services::jobs;
use crate::utils::dates::{parse_target_month, today_utc};

pub async fn generate_fees(
    service: &CronService,
    request: &HttpRequest,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let body: GenerateFeesBody = match parse_optional_body(&body) {
        Ok(body) => body,
        Err(resp) => return Ok(resp),
    };

    let target_month = match body.target_month.as_deref() {
        Some(raw) => match parse_target_month(raw) {
            Ok(month) => month,
            Err(e) => return Ok(job_error_response("generate-fees", &e)),
        },
        None => today_utc(),
    };

    let storage = match service.get_service_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(job_error_response("generate-fees", &e)),
    };
    let settings = service.get_settings(request);

    match jobs::generate_fees(storage.as_ref(), target_month, settings.due_day).await {
        Ok(result) => Ok(HttpResponse::Ok().json(CronCountResponse::new(
            format!(
                "Generated {} fee records for {}",
                result.count,
                result.payment_month.format("%Y-%m")
            ),
            result.count,
        ))),
        Err(e) => Ok(job_error_response("generate-fees", &e)),
    }
}
