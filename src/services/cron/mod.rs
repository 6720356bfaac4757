//! 定时任务入口
//!
//! 外部调度器通过共享密钥调用；响应体沿用调度器约定的
//! `{success, message, ...}` / `{error}` 格式，而不是统一的 ApiResponse。

pub mod generate_fees;
pub mod mark_overdue;
pub mod send_reminders;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::error;

use crate::errors::EduDeskError;
use crate::models::cron::responses::CronErrorResponse;
use crate::services::jobs::JobSettings;
use crate::services::notifications::Notifier;
use crate::storage::{ServiceStorage, Storage};

pub struct CronService;

impl CronService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 特权存储；未配置时返回配置错误
    pub(crate) fn get_service_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, EduDeskError> {
        request
            .app_data::<web::Data<ServiceStorage>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_default()
            .require()
    }

    pub(crate) fn get_settings(&self, request: &HttpRequest) -> JobSettings {
        request
            .app_data::<web::Data<JobSettings>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_default()
    }

    pub(crate) fn get_notifier(&self, request: &HttpRequest) -> Notifier {
        request
            .app_data::<web::Data<Notifier>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_default()
    }

    // 生成月度学费
    pub async fn generate_fees(
        &self,
        request: &HttpRequest,
        body: web::Bytes,
    ) -> ActixResult<HttpResponse> {
        generate_fees::generate_fees(self, request, body).await
    }

    // 标记逾期
    pub async fn mark_overdue(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        mark_overdue::mark_overdue(self, request).await
    }

    // 发送缴费提醒
    pub async fn send_reminders(
        &self,
        request: &HttpRequest,
        body: web::Bytes,
    ) -> ActixResult<HttpResponse> {
        send_reminders::send_reminders(self, request, body).await
    }
}

/// 解析可选的 JSON 请求体；空请求体视为全部使用默认值
pub(crate) fn parse_optional_body<T: DeserializeOwned + Default>(
    body: &[u8],
) -> Result<T, HttpResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        HttpResponse::BadRequest().json(CronErrorResponse::new(format!(
            "Invalid request body: {e}"
        )))
    })
}

/// 任务错误映射：输入问题 400，其余 500
pub(crate) fn job_error_response(job: &str, err: &EduDeskError) -> HttpResponse {
    match err {
        EduDeskError::Validation(msg) | EduDeskError::DateParse(msg) => {
            HttpResponse::BadRequest().json(CronErrorResponse::new(msg.as_str()))
        }
        other => {
            error!("Cron job {} failed: {}", job, other);
            HttpResponse::InternalServerError().json(CronErrorResponse::new(other.message()))
        }
    }
}

#[cfg(test)]
mod tests;
