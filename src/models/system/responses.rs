use serde::Serialize;
use ts_rs::TS;

// 健康检查响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub system_name: String,
    pub version: String,
    pub environment: String,
    #[ts(type = "number")]
    pub uptime_seconds: i64,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    // 是否配置了定时任务使用的特权数据库
    pub jobs_enabled: bool,
}
