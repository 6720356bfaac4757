use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SessionService, check_session_times};
use crate::models::sessions::requests::CreateSessionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::validation_failed;

pub async fn create_session(
    service: &SessionService,
    request: &HttpRequest,
    class_id: i64,
    session: CreateSessionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = check_session_times(session.start_time.as_deref(), session.end_time.as_deref())
    {
        return Ok(validation_failed(msg));
    }

    if let Ok(None) = storage.get_class_by_id(class_id).await {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        )));
    }

    match storage.create_class_session(class_id, session).await {
        Ok(session) => {
            info!(
                "Session {} scheduled for class {} on {}",
                session.id, class_id, session.session_date
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(session, "Session created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Session creation failed: {e}"),
            )),
        ),
    }
}
