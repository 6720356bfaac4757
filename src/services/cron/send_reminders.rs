use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{CronService, job_error_response, parse_optional_body};
use crate::models::cron::{requests::SendRemindersBody, responses::ReminderRunResponse};
use crate::services::jobs;
use crate::utils::dates::today_utc;

pub async fn send_reminders(
    service: &CronService,
    request: &HttpRequest,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let body: SendRemindersBody = match parse_optional_body(&body) {
        Ok(body) => body,
        Err(resp) => return Ok(resp),
    };

    let settings = service.get_settings(request);
    let options = match settings.reminder_options(body.days_before_due) {
        Ok(options) => options,
        Err(e) => return Ok(job_error_response("send-reminders", &e)),
    };

    let storage = match service.get_service_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(job_error_response("send-reminders", &e)),
    };
    let notifier = service.get_notifier(request);

    match jobs::dispatch_reminders(storage.as_ref(), &notifier, today_utc(), &options).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ReminderRunResponse::from(summary))),
        Err(e) => Ok(job_error_response("send-reminders", &e)),
    }
}
