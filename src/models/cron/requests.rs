use serde::Deserialize;

// POST /cron/generate-fees 请求体
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFeesBody {
    pub target_month: Option<String>,
}

// POST /cron/send-reminders 请求体
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRemindersBody {
    pub days_before_due: Option<i64>,
}
