use super::entities::{PaymentMethod, PaymentStatus};
use crate::models::common::{PaginationQuery, deserialize_optional_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 学费列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub student_id: Option<i64>,
    // 任意属于目标月份的日期
    pub month: Option<chrono::NaiveDate>,
}

// 手动创建学费记录
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct CreatePaymentRequest {
    pub student_id: i64,
    pub enrollment_id: i64,
    pub amount: f64,
    pub payment_month: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub notes: Option<String>,
}

// 确认收款
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct MarkPaidRequest {
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub payment_date: Option<chrono::NaiveDate>,
}

// 手动更新状态（部分缴费 / 逾期）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
    pub amount_paid: Option<f64>,
    pub notes: Option<String>,
}

// 管理端手动触发生成
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct GenerateFeesRequest {
    pub target_month: Option<String>,
}
