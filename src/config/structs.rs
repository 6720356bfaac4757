use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub cron: CronConfig,
    #[serde(default)]
    pub billing: BillingConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub sms: SmsConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String, // 数据库连接 URL（从 scheme 自动推断类型）
    #[serde(skip_serializing, default)]
    pub service_url: String, // 特权连接（仅定时任务使用），为空表示未配置
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 外部认证服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub jwt_secret: String,
    #[serde(default)]
    pub audience: Option<String>,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub default_ttl: u64,
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// 定时任务入口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronConfig {
    #[serde(skip_serializing, default)]
    pub secret: String,
    pub requests_per_minute: u32,
}

impl Default for CronConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            requests_per_minute: 30,
        }
    }
}

/// 账单配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    pub due_day: u32, // 每月缴费截止日（1-28）
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self { due_day: 5 }
    }
}

/// 缴费提醒配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    pub default_days_before_due: u32,
    pub send_delay_ms: u64, // 两次外部发送之间的间隔，避免触发限流
    pub skip_already_reminded: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_days_before_due: 3,
            send_delay_ms: 200,
            skip_already_reminded: true,
        }
    }
}

/// 邮件服务配置（为空表示未启用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub from_address: String,
    pub api_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_address: String::new(),
            api_url: "https://api.resend.com/emails".to_string(),
        }
    }
}

/// 短信服务配置（为空表示未启用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    pub account_sid: String,
    #[serde(skip_serializing, default)]
    pub auth_token: String,
    pub from_number: String,
    pub api_base_url: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base_url: "https://api.twilio.com/2010-04-01".to_string(),
        }
    }
}
