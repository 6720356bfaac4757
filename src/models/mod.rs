//! 业务数据模型
//!
//! 按领域划分：`entities` 为业务实体，`requests` 为请求体/查询参数，
//! `responses` 为接口响应。所有对外结构都导出 TypeScript 类型供前端使用。

use serde::Serialize;

/// 定义以小写字符串存储的枚举
///
/// 自动生成 Display / FromStr / Deserialize 以及 `as_str()`，
/// 数据库实体与接口共用同一套字符串表示。
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, ts_rs::TS)]
        $(#[$meta])*
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(|_| {
                    serde::de::Error::custom(format!(
                        "无效的取值: '{s}'. 支持: {}",
                        [$($value),+].join(", ")
                    ))
                })
            }
        }
    };
}

pub mod assessments;
pub mod attendance;
pub mod classes;
pub mod common;
pub mod communications;
pub mod cron;
pub mod enrollments;
pub mod institutes;
pub mod payments;
pub mod profiles;
pub mod sessions;
pub mod students;
pub mod system;
pub mod teachers;
pub mod tutorials;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 接口业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    ValidationFailed = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    // 用户档案
    ProfileNotFound = 2001,
    ProfileNotProvisioned = 2002,
    RoleChangeForbidden = 2003,

    // 机构 / 教师 / 学生
    InstituteNotFound = 2101,
    InstituteAlreadyExists = 2102,
    TeacherNotFound = 2201,
    StudentNotFound = 2301,
    StudentAlreadyExists = 2302,

    // 班级 / 课时 / 选课
    ClassNotFound = 2401,
    ClassAlreadyExists = 2402,
    SessionNotFound = 2411,
    EnrollmentNotFound = 2501,
    EnrollmentAlreadyExists = 2502,

    // 学费
    PaymentNotFound = 2601,
    PaymentAlreadyPaid = 2602,
    PaymentInvalidTransition = 2603,

    // 教学
    AssessmentNotFound = 2701,
    GradeOutOfRange = 2702,
    TutorialNotFound = 2801,

    // 通讯
    NotificationUnavailable = 2901,
    NotificationFailed = 2902,

    // 服务端错误
    InternalServerError = 5000,
    ConfigurationError = 5001,
}
