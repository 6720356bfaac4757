pub mod assessments;
pub mod attendance;
pub mod classes;
pub mod communications;
pub mod cron;
pub mod enrollments;
pub mod institutes;
pub mod jobs;
pub mod notifications;
pub mod payments;
pub mod profiles;
pub mod sessions;
pub mod students;
pub mod system;
pub mod teachers;
pub mod tutorials;

pub use assessments::AssessmentService;
pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use communications::CommunicationService;
pub use cron::CronService;
pub use enrollments::EnrollmentService;
pub use institutes::InstituteService;
pub use payments::PaymentService;
pub use profiles::ProfileService;
pub use sessions::SessionService;
pub use students::StudentService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use tutorials::TutorialService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取出请求路径使用的存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 参数校验失败
pub(crate) fn validation_failed(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

/// 数据库唯一约束冲突（SQLite / PostgreSQL / MySQL 的报错文本）
pub(crate) fn is_unique_violation(err: &crate::errors::EduDeskError) -> bool {
    let msg = err.message();
    msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key value")
        || msg.contains("Duplicate entry")
}

/// 外键约束失败
pub(crate) fn is_foreign_key_violation(err: &crate::errors::EduDeskError) -> bool {
    let msg = err.message();
    msg.contains("FOREIGN KEY constraint failed") || msg.contains("foreign key constraint")
}
