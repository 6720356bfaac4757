//! 通知文案（缴费提醒与手动消息）

use crate::models::payments::entities::PaymentReminderTarget;

use super::{EmailMessage, SmsMessage};

fn class_label(target: &PaymentReminderTarget) -> &str {
    target.class_name.as_deref().unwrap_or("class")
}

fn month_label(target: &PaymentReminderTarget) -> String {
    target.payment_month.format("%B %Y").to_string()
}

pub fn reminder_subject(target: &PaymentReminderTarget) -> String {
    format!(
        "Payment reminder: {} fee for {}",
        class_label(target),
        month_label(target)
    )
}

/// 纯文本正文（同时写入通讯记录）
pub fn reminder_text(target: &PaymentReminderTarget) -> String {
    format!(
        "Dear {}, the {} fee of {:.2} for {} ({}) is due on {}. Please make the payment before the due date.",
        target.addressee(),
        month_label(target),
        target.amount,
        target.student_name,
        class_label(target),
        target.due_date.format("%Y-%m-%d"),
    )
}

pub fn reminder_email(target: &PaymentReminderTarget, to: &str) -> EmailMessage {
    let html = format!(
        "<p>Dear {},</p>\
         <p>This is a reminder that the <strong>{}</strong> fee of <strong>{:.2}</strong> \
         for {} ({}) is due on <strong>{}</strong>.</p>\
         <p>Please make the payment before the due date.</p>",
        target.addressee(),
        month_label(target),
        target.amount,
        target.student_name,
        class_label(target),
        target.due_date.format("%Y-%m-%d"),
    );
    EmailMessage {
        to: to.to_string(),
        subject: reminder_subject(target),
        html,
    }
}

pub fn reminder_sms(target: &PaymentReminderTarget, to: &str) -> SmsMessage {
    SmsMessage {
        to: to.to_string(),
        body: format!(
            "Reminder: {} fee {:.2} for {} due {}.",
            class_label(target),
            target.amount,
            target.student_name,
            target.due_date.format("%Y-%m-%d"),
        ),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 手动发送的邮件，正文按段落转成 HTML
pub fn manual_email(to: &str, subject: &str, message: &str) -> EmailMessage {
    let html = message
        .split("\n\n")
        .map(|para| format!("<p>{}</p>", escape_html(para).replace('\n', "<br>")))
        .collect::<String>();
    EmailMessage {
        to: to.to_string(),
        subject: subject.to_string(),
        html,
    }
}

pub fn manual_sms(to: &str, message: &str) -> SmsMessage {
    SmsMessage {
        to: to.to_string(),
        body: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn target() -> PaymentReminderTarget {
        PaymentReminderTarget {
            payment_id: 1,
            student_id: 2,
            student_name: "Ana Silva".to_string(),
            student_email: None,
            student_phone: None,
            guardian_name: Some("Maria Silva".to_string()),
            guardian_email: Some("maria@example.com".to_string()),
            guardian_phone: None,
            class_name: Some("Piano".to_string()),
            amount: 120.0,
            payment_month: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 5).expect("valid date"),
        }
    }

    #[test]
    fn test_reminder_text_mentions_amount_and_due_date() {
        let text = reminder_text(&target());
        assert!(text.starts_with("Dear Maria Silva"));
        assert!(text.contains("120.00"));
        assert!(text.contains("2025-03-05"));
        assert!(text.contains("March 2025"));
    }

    #[test]
    fn test_email_and_sms_addressing() {
        let email = reminder_email(&target(), "maria@example.com");
        assert_eq!(email.to, "maria@example.com");
        assert!(email.subject.contains("Piano"));

        let sms = reminder_sms(&target(), "+15551234567");
        assert_eq!(sms.to, "+15551234567");
        assert!(sms.body.contains("Ana Silva"));
    }

    #[test]
    fn test_manual_email_escapes_markup() {
        let email = manual_email("a@b.co", "Hello", "Fees <due>\nsoon\n\nThanks & regards");
        assert_eq!(
            email.html,
            "<p>Fees &lt;due&gt;<br>soon</p><p>Thanks &amp; regards</p>"
        );
    }
}
