use actix_web::HttpResponse;
use tracing::error;

use crate::errors::EduDeskError;
use crate::models::{ApiResponse, ErrorCode};

/// 将业务错误映射为统一响应
///
/// `not_found` 为资源不存在时使用的业务错误码。
pub fn error_response(err: &EduDeskError, not_found: ErrorCode) -> HttpResponse {
    match err {
        EduDeskError::Validation(msg) | EduDeskError::DateParse(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.as_str())),
        EduDeskError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(not_found, msg.as_str()))
        }
        EduDeskError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg.as_str()))
        }
        EduDeskError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.as_str())),
        EduDeskError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.as_str()))
        }
        EduDeskError::Configuration(msg) => {
            error!("Configuration error: {}", msg);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ConfigurationError,
                msg.as_str(),
            ))
        }
        EduDeskError::Notification(msg) => {
            error!("Notification error: {}", msg);
            HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::NotificationFailed,
                msg.as_str(),
            ))
        }
        other => {
            error!("Internal error: {}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                other.message(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (EduDeskError::validation("bad"), StatusCode::BAD_REQUEST),
            (EduDeskError::date_parse("bad date"), StatusCode::BAD_REQUEST),
            (EduDeskError::not_found("missing"), StatusCode::NOT_FOUND),
            (EduDeskError::conflict("paid"), StatusCode::CONFLICT),
            (EduDeskError::authorization("nope"), StatusCode::FORBIDDEN),
            (
                EduDeskError::configuration("no url"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                EduDeskError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err, ErrorCode::NotFound).status(), status);
        }
    }
}
