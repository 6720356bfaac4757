pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveTime;
use std::sync::Arc;

use crate::models::sessions::requests::{CreateSessionRequest, SessionListQuery};
use crate::storage::Storage;

pub struct SessionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SessionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 班级课时列表
    pub async fn list_sessions(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: SessionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_sessions(self, request, class_id, query).await
    }

    // 安排课时
    pub async fn create_session(
        &self,
        request: &HttpRequest,
        class_id: i64,
        session: CreateSessionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_session(self, request, class_id, session).await
    }

    // 删除课时
    pub async fn delete_session(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_session(self, request, id).await
    }
}

/// 上课时间为 HH:MM，且结束时间晚于开始时间
pub(crate) fn check_session_times(
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(), String> {
    let parse = |field: &str, value: &str| {
        NaiveTime::parse_from_str(value, "%H:%M")
            .map_err(|_| format!("{field} must be in HH:MM format"))
    };

    let start = start_time.map(|v| parse("start_time", v)).transpose()?;
    let end = end_time.map(|v| parse("end_time", v)).transpose()?;

    if let (Some(start), Some(end)) = (start, end)
        && end <= start
    {
        return Err("end_time must be later than start_time".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_times() {
        assert!(check_session_times(None, None).is_ok());
        assert!(check_session_times(Some("09:00"), Some("10:30")).is_ok());
        assert!(check_session_times(Some("09:00"), None).is_ok());
        assert!(check_session_times(Some("9am"), None).is_err());
        assert!(check_session_times(Some("10:00"), Some("10:00")).is_err());
        assert!(check_session_times(Some("11:00"), Some("10:00")).is_err());
    }
}
