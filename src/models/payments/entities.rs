use serde::Serialize;
use ts_rs::TS;

string_enum! {
    /// 缴费状态
    ///
    /// 状态流转：
    /// - unpaid -> overdue（逾期标记任务，按日期触发，单向）
    /// - unpaid | overdue | partial -> paid（手动确认收款）
    /// - unpaid | overdue -> partial（手动登记部分缴费）
    ///
    /// 不存在回到 unpaid 的流转。
    #[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
    PaymentStatus {
        Paid => "paid",
        Unpaid => "unpaid",
        Overdue => "overdue",
        Partial => "partial",
    }
}

impl PaymentStatus {
    /// 是否允许从当前状态流转到目标状态
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Unpaid, PaymentStatus::Overdue)
                | (
                    PaymentStatus::Unpaid | PaymentStatus::Overdue,
                    PaymentStatus::Partial
                )
                | (
                    PaymentStatus::Unpaid | PaymentStatus::Overdue | PaymentStatus::Partial,
                    PaymentStatus::Paid
                )
        )
    }

    /// 允许流转到 next 的全部来源状态
    pub fn sources_of(next: PaymentStatus) -> Vec<PaymentStatus> {
        Self::ALL
            .iter()
            .copied()
            .filter(|status| status.can_transition_to(next))
            .collect()
    }
}

string_enum! {
    /// 支付方式
    #[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
    PaymentMethod {
        Cash => "cash",
        Card => "card",
        BankTransfer => "bank_transfer",
        Online => "online",
        Other => "other",
    }
}

// 学费记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct FeePayment {
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: i64,
    pub amount: f64,
    pub amount_paid: Option<f64>,
    // 计费月份（当月第一天）
    pub payment_month: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub payment_date: Option<chrono::NaiveDate>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 列表展示用：附带学生与班级名称
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct FeePaymentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub payment: FeePayment,
    pub student_name: Option<String>,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
}

// 缴费提醒目标：待缴记录与学生、监护人联系方式的联合视图
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReminderTarget {
    pub payment_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: Option<String>,
    pub student_phone: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_phone: Option<String>,
    pub class_name: Option<String>,
    pub amount: f64,
    pub payment_month: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl PaymentReminderTarget {
    /// 邮件收件人：优先监护人邮箱，其次学生邮箱
    pub fn email_recipient(&self) -> Option<&str> {
        non_blank(&self.guardian_email).or_else(|| non_blank(&self.student_email))
    }

    /// 短信收件人：优先监护人手机，其次学生手机
    pub fn phone_recipient(&self) -> Option<&str> {
        non_blank(&self.guardian_phone).or_else(|| non_blank(&self.student_phone))
    }

    /// 称呼：有监护人时称呼监护人
    pub fn addressee(&self) -> &str {
        non_blank(&self.guardian_name).unwrap_or(&self.student_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> PaymentReminderTarget {
        PaymentReminderTarget {
            payment_id: 1,
            student_id: 1,
            student_name: "Amal Perera".to_string(),
            student_email: Some("amal@example.com".to_string()),
            student_phone: None,
            guardian_name: None,
            guardian_email: Some("  ".to_string()),
            guardian_phone: Some("+94770000000".to_string()),
            class_name: None,
            amount: 2500.0,
            payment_month: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        }
    }

    #[test]
    fn test_status_transitions() {
        assert!(PaymentStatus::Unpaid.can_transition_to(PaymentStatus::Overdue));
        assert!(PaymentStatus::Unpaid.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Overdue.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Overdue.can_transition_to(PaymentStatus::Partial));
        assert!(PaymentStatus::Partial.can_transition_to(PaymentStatus::Paid));

        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Overdue));
        assert!(!PaymentStatus::Overdue.can_transition_to(PaymentStatus::Unpaid));
        assert!(!PaymentStatus::Partial.can_transition_to(PaymentStatus::Unpaid));
        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Paid));
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in PaymentStatus::ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(*status));
        }
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_blank_guardian_email_falls_back_to_student() {
        let target = target();
        assert_eq!(target.email_recipient(), Some("amal@example.com"));
        assert_eq!(target.phone_recipient(), Some("+94770000000"));
        assert_eq!(target.addressee(), "Amal Perera");
    }
}
