//! 账单任务
//!
//! 定时任务入口与管理端手动触发共用这里的函数。
//! 函数只依赖显式传入的存储、发送通道与参数，不读取全局配置。

pub mod fees;
pub mod reminders;

pub use fees::{generate_fees, mark_overdue};
pub use reminders::{ReminderOptions, dispatch_reminders};

use crate::config::AppConfig;

/// 任务参数（启动时从配置读取，通过 app_data 注入）
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub due_day: u32,
    pub default_days_before_due: i64,
    pub send_delay_ms: u64,
    pub skip_already_reminded: bool,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            due_day: 5,
            default_days_before_due: 3,
            send_delay_ms: 0,
            skip_already_reminded: true,
        }
    }
}

impl JobSettings {
    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self {
            due_day: config.billing.due_day,
            default_days_before_due: i64::from(config.reminders.default_days_before_due),
            send_delay_ms: config.reminders.send_delay_ms,
            skip_already_reminded: config.reminders.skip_already_reminded,
        }
    }

    /// 构建一次提醒批处理的参数；未指定天数时使用默认值
    pub fn reminder_options(&self, days_before_due: Option<i64>) -> crate::errors::Result<ReminderOptions> {
        Ok(
            ReminderOptions::new(days_before_due.unwrap_or(self.default_days_before_due))?
                .with_send_delay(std::time::Duration::from_millis(self.send_delay_ms))
                .with_duplicate_guard(self.skip_already_reminded),
        )
    }
}
