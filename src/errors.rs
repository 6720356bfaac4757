//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_edudesk_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduDeskError {
            $($variant(String),)*
        }

        impl EduDeskError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduDeskError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduDeskError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduDeskError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduDeskError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduDeskError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edudesk_errors! {
    Configuration("E001", "Configuration Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Notification("E013", "Notification Delivery Error"),
}

impl EduDeskError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于调用方输入问题（映射为 4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EduDeskError::Validation(_)
                | EduDeskError::NotFound(_)
                | EduDeskError::Conflict(_)
                | EduDeskError::DateParse(_)
        )
    }
}

impl fmt::Display for EduDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduDeskError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduDeskError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduDeskError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduDeskError {
    fn from(err: std::io::Error) -> Self {
        EduDeskError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduDeskError {
    fn from(err: serde_json::Error) -> Self {
        EduDeskError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduDeskError {
    fn from(err: chrono::ParseError) -> Self {
        EduDeskError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for EduDeskError {
    fn from(err: reqwest::Error) -> Self {
        EduDeskError::Notification(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduDeskError::configuration("test").code(), "E001");
        assert_eq!(EduDeskError::database_operation("test").code(), "E004");
        assert_eq!(EduDeskError::validation("test").code(), "E006");
        assert_eq!(EduDeskError::notification("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduDeskError::configuration("test").error_type(),
            "Configuration Error"
        );
        assert_eq!(
            EduDeskError::conflict("test").error_type(),
            "Resource Conflict"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduDeskError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(EduDeskError::not_found("payment").is_client_error());
        assert!(EduDeskError::conflict("already paid").is_client_error());
        assert!(!EduDeskError::database_operation("boom").is_client_error());
        assert!(!EduDeskError::configuration("missing key").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = EduDeskError::configuration("Service database URL not configured");
        let formatted = err.format_simple();
        assert!(formatted.contains("Configuration Error"));
        assert!(formatted.contains("Service database URL not configured"));
    }
}
