use serde::Serialize;
use ts_rs::TS;

// 月度学费生成结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct FeeGenerationResult {
    pub payment_month: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub count: u64,
}

// 逾期标记结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct OverdueMarkResult {
    pub as_of: chrono::NaiveDate,
    pub count: u64,
}
