use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::errors::{EduDeskError, Result};
use crate::models::communications::entities::{
    CommunicationChannel, CommunicationKind, CommunicationStatus, NewCommunicationLog,
    ReminderSummary,
};
use crate::models::payments::entities::PaymentReminderTarget;
use crate::services::notifications::{Notifier, messages};
use crate::storage::Storage;
use crate::utils::dates::day_bounds_utc;

/// 提前天数的允许范围
pub const MAX_DAYS_BEFORE_DUE: i64 = 60;

/// 一次提醒批处理的参数，只能通过 `new` 构造
#[derive(Debug, Clone)]
pub struct ReminderOptions {
    days_before_due: i64,
    // 两次外部发送之间的间隔
    send_delay: Duration,
    skip_already_reminded: bool,
}

impl ReminderOptions {
    pub fn new(days_before_due: i64) -> Result<Self> {
        if !(0..=MAX_DAYS_BEFORE_DUE).contains(&days_before_due) {
            return Err(EduDeskError::validation(format!(
                "daysBeforeDue must be between 0 and {MAX_DAYS_BEFORE_DUE}"
            )));
        }
        Ok(Self {
            days_before_due,
            send_delay: Duration::ZERO,
            skip_already_reminded: true,
        })
    }

    pub fn days_before_due(&self) -> i64 {
        self.days_before_due
    }

    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    pub fn with_duplicate_guard(mut self, enabled: bool) -> Self {
        self.skip_already_reminded = enabled;
        self
    }
}

/// 两次外部调用之间的节流
struct Pacer {
    delay: Duration,
    called: bool,
}

impl Pacer {
    async fn wait(&mut self) {
        if self.called && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.called = true;
    }
}

/// 向 `today + days_before_due` 到期的未缴记录发送提醒
///
/// 每条记录至多写入一条通讯记录；发送失败与写记录失败都收集到
/// `errors` 中，不中断批处理。
pub async fn dispatch_reminders(
    storage: &dyn Storage,
    notifier: &Notifier,
    today: NaiveDate,
    options: &ReminderOptions,
) -> Result<ReminderSummary> {
    let target_date = today + chrono::Duration::days(options.days_before_due);
    let targets = storage.list_reminder_targets(target_date).await?;
    info!(
        "Dispatching reminders for {} payments due on {}",
        targets.len(),
        target_date
    );

    let (day_start, day_end) = day_bounds_utc(today);
    let mut pacer = Pacer {
        delay: options.send_delay,
        called: false,
    };
    let mut summary = ReminderSummary::default();

    for target in targets {
        summary.payments_processed += 1;

        if options.skip_already_reminded {
            match storage
                .has_sent_reminder_between(target.payment_id, day_start, day_end)
                .await
            {
                Ok(true) => {
                    info!(
                        "Payment {} already reminded today, skipping",
                        target.payment_id
                    );
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    // 无法确认时照常发送
                    warn!(
                        "Failed to check reminder history for payment {}: {}",
                        target.payment_id, e
                    );
                }
            }
        }

        let log = send_one(&target, notifier, &mut pacer, &mut summary).await;
        if let Err(e) = storage.create_communication_log(log).await {
            let message = format!(
                "Payment {}: failed to record communication log: {}",
                target.payment_id, e
            );
            warn!("{}", message);
            summary.errors.push(message);
        }
    }

    info!(
        "Reminder run finished: {} processed, {} emails, {} SMS, {} errors",
        summary.payments_processed,
        summary.emails_sent,
        summary.sms_sent,
        summary.errors.len()
    );
    Ok(summary)
}

async fn send_one(
    target: &PaymentReminderTarget,
    notifier: &Notifier,
    pacer: &mut Pacer,
    summary: &mut ReminderSummary,
) -> NewCommunicationLog {
    let email_to = target.email_recipient();
    let phone_to = target.phone_recipient();

    let mut email_attempted = false;
    let mut sms_attempted = false;
    let mut succeeded = 0;
    let mut failures = Vec::new();

    if let (Some(provider), Some(to)) = (&notifier.email, email_to) {
        email_attempted = true;
        pacer.wait().await;
        match provider.send_email(&messages::reminder_email(target, to)).await {
            Ok(()) => {
                succeeded += 1;
                summary.emails_sent += 1;
            }
            Err(e) => failures.push(format!(
                "Payment {}: email to {} failed: {}",
                target.payment_id,
                to,
                e.message()
            )),
        }
    }

    if let (Some(provider), Some(to)) = (&notifier.sms, phone_to) {
        sms_attempted = true;
        pacer.wait().await;
        match provider.send_sms(&messages::reminder_sms(target, to)).await {
            Ok(()) => {
                succeeded += 1;
                summary.sms_sent += 1;
            }
            Err(e) => failures.push(format!(
                "Payment {}: SMS to {} failed: {}",
                target.payment_id,
                to,
                e.message()
            )),
        }
    }

    for failure in &failures {
        warn!("{}", failure);
    }
    summary.errors.extend(failures.iter().cloned());

    let attempted = usize::from(email_attempted) + usize::from(sms_attempted);
    NewCommunicationLog {
        student_id: Some(target.student_id),
        payment_id: Some(target.payment_id),
        kind: CommunicationKind::PaymentReminder,
        channel: CommunicationChannel::from_attempts(email_attempted, sms_attempted),
        recipient_email: email_to.map(str::to_string),
        recipient_phone: phone_to.map(str::to_string),
        subject: Some(messages::reminder_subject(target)),
        message: messages::reminder_text(target),
        status: CommunicationStatus::from_outcome(attempted, succeeded),
        error: if failures.is_empty() {
            None
        } else {
            Some(failures.join("; "))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::communications::{
        entities::CommunicationLog, requests::CommunicationListQuery,
    };
    use crate::models::payments::requests::CreatePaymentRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::notifications::fakes::{RecordingEmail, RecordingSms};
    use crate::storage::testing::{
        memory_storage, seed_class, seed_enrollment, seed_student, student_request,
    };
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 2).expect("valid date")
    }

    /// 创建一条在 today + days 到期的未缴记录，返回 payment id
    async fn seed_due_payment(
        storage: &Arc<dyn Storage>,
        student: CreateStudentRequest,
        days: i64,
    ) -> i64 {
        let code = student.student_code.clone();
        let student = seed_student(storage, student).await;
        let class = seed_class(storage, &format!("C-{code}"), 90.0).await;
        let enrollment = seed_enrollment(storage, student.id, class.id, None).await;
        storage
            .create_payment(CreatePaymentRequest {
                student_id: student.id,
                enrollment_id: enrollment.id,
                amount: 90.0,
                payment_month: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
                due_date: today() + chrono::Duration::days(days),
                notes: None,
            })
            .await
            .expect("payment created")
            .id
    }

    async fn logs(storage: &Arc<dyn Storage>) -> Vec<CommunicationLog> {
        storage
            .list_communication_logs_with_pagination(CommunicationListQuery {
                pagination: PaginationQuery { page: 1, size: 100 },
                student_id: None,
                kind: None,
                channel: None,
            })
            .await
            .expect("list logs")
            .items
    }

    fn options(days: i64) -> ReminderOptions {
        ReminderOptions::new(days).expect("valid options")
    }

    #[tokio::test]
    async fn test_student_email_only_sends_one_email() {
        let storage = memory_storage().await;
        let mut student = student_request("E1");
        student.email = Some("student@example.com".to_string());
        let payment_id = seed_due_payment(&storage, student, 3).await;

        let email = Arc::new(RecordingEmail::default());
        let sms = Arc::new(RecordingSms::default());
        let notifier = Notifier::new(Some(email.clone()), Some(sms.clone()));

        let summary = dispatch_reminders(storage.as_ref(), &notifier, today(), &options(3))
            .await
            .expect("dispatch");

        assert_eq!(summary.emails_sent, 1);
        assert_eq!(summary.sms_sent, 0);
        assert_eq!(summary.payments_processed, 1);
        assert!(summary.errors.is_empty());
        assert_eq!(email.sent_to(), vec!["student@example.com".to_string()]);
        assert!(sms.sent_to().is_empty());

        let logs = logs(&storage).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].payment_id, Some(payment_id));
        assert_eq!(logs[0].channel, CommunicationChannel::Email);
        assert_eq!(logs[0].status, CommunicationStatus::Sent);
        assert_eq!(logs[0].kind, CommunicationKind::PaymentReminder);
    }

    #[tokio::test]
    async fn test_guardian_contacts_use_both_channels() {
        let storage = memory_storage().await;
        let mut student = student_request("B1");
        student.email = Some("student@example.com".to_string());
        student.guardian_email = Some("guardian@example.com".to_string());
        student.guardian_phone = Some("+15550001111".to_string());
        seed_due_payment(&storage, student, 3).await;

        let email = Arc::new(RecordingEmail::default());
        let sms = Arc::new(RecordingSms::default());
        let notifier = Notifier::new(Some(email.clone()), Some(sms.clone()));

        let summary = dispatch_reminders(storage.as_ref(), &notifier, today(), &options(3))
            .await
            .expect("dispatch");

        assert_eq!(summary.emails_sent, 1);
        assert_eq!(summary.sms_sent, 1);
        assert_eq!(email.sent_to(), vec!["guardian@example.com".to_string()]);
        assert_eq!(sms.sent_to(), vec!["+15550001111".to_string()]);

        let logs = logs(&storage).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].channel, CommunicationChannel::Both);
        assert_eq!(logs[0].recipient_email.as_deref(), Some("guardian@example.com"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_collected() {
        let storage = memory_storage().await;
        let mut student = student_request("F1");
        student.guardian_email = Some("guardian@example.com".to_string());
        seed_due_payment(&storage, student, 3).await;

        let notifier = Notifier::new(Some(Arc::new(RecordingEmail::failing())), None);

        let summary = dispatch_reminders(storage.as_ref(), &notifier, today(), &options(3))
            .await
            .expect("dispatch");

        assert_eq!(summary.emails_sent, 0);
        assert_eq!(summary.payments_processed, 1);
        assert_eq!(summary.errors.len(), 1);

        let logs = logs(&storage).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, CommunicationStatus::Failed);
        assert!(logs[0].error.is_some());
    }

    #[tokio::test]
    async fn test_partial_failure_still_counts_as_sent() {
        let storage = memory_storage().await;
        let mut student = student_request("P1");
        student.guardian_email = Some("guardian@example.com".to_string());
        student.phone = Some("+15550002222".to_string());
        seed_due_payment(&storage, student, 3).await;

        let notifier = Notifier::new(
            Some(Arc::new(RecordingEmail::default())),
            Some(Arc::new(RecordingSms::failing())),
        );

        let summary = dispatch_reminders(storage.as_ref(), &notifier, today(), &options(3))
            .await
            .expect("dispatch");
        assert_eq!(summary.emails_sent, 1);
        assert_eq!(summary.sms_sent, 0);
        assert_eq!(summary.errors.len(), 1);

        let logs = logs(&storage).await;
        assert_eq!(logs[0].status, CommunicationStatus::Sent);
        assert_eq!(logs[0].channel, CommunicationChannel::Both);
    }

    #[tokio::test]
    async fn test_no_contact_or_provider_is_skipped() {
        let storage = memory_storage().await;
        seed_due_payment(&storage, student_request("N1"), 3).await;

        let notifier = Notifier::new(Some(Arc::new(RecordingEmail::default())), None);
        let summary = dispatch_reminders(storage.as_ref(), &notifier, today(), &options(3))
            .await
            .expect("dispatch");

        assert_eq!(summary.payments_processed, 1);
        assert_eq!(summary.emails_sent, 0);

        let logs = logs(&storage).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].channel, CommunicationChannel::NoChannel);
        assert_eq!(logs[0].status, CommunicationStatus::Skipped);
    }

    #[tokio::test]
    async fn test_only_exact_due_date_is_targeted() {
        let storage = memory_storage().await;
        let mut early = student_request("D2");
        early.email = Some("early@example.com".to_string());
        seed_due_payment(&storage, early, 2).await;
        let mut exact = student_request("D3");
        exact.email = Some("exact@example.com".to_string());
        seed_due_payment(&storage, exact, 3).await;

        let email = Arc::new(RecordingEmail::default());
        let notifier = Notifier::new(Some(email.clone()), None);
        let summary = dispatch_reminders(storage.as_ref(), &notifier, today(), &options(3))
            .await
            .expect("dispatch");

        assert_eq!(summary.payments_processed, 1);
        assert_eq!(email.sent_to(), vec!["exact@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_guard_skips_second_run() {
        // 去重按当天的发送记录判断，这里使用真实日期
        let today = crate::utils::dates::today_utc();
        let storage = memory_storage().await;
        let mut student = student_request("G1");
        student.email = Some("today@example.com".to_string());
        let student = seed_student(&storage, student).await;
        let class = seed_class(&storage, "G-CLASS", 40.0).await;
        let enrollment = seed_enrollment(&storage, student.id, class.id, None).await;
        storage
            .create_payment(CreatePaymentRequest {
                student_id: student.id,
                enrollment_id: enrollment.id,
                amount: 40.0,
                payment_month: today,
                due_date: today,
                notes: None,
            })
            .await
            .expect("payment created");

        let email = Arc::new(RecordingEmail::default());
        let notifier = Notifier::new(Some(email.clone()), None);

        let first = dispatch_reminders(storage.as_ref(), &notifier, today, &options(0))
            .await
            .expect("first run");
        let second = dispatch_reminders(storage.as_ref(), &notifier, today, &options(0))
            .await
            .expect("second run");

        assert_eq!(first.emails_sent, 1);
        assert_eq!(second.emails_sent, 0);
        assert_eq!(second.payments_processed, 1);
        assert_eq!(email.sent_to().len(), 1);
        assert_eq!(logs(&storage).await.len(), 1);

        let unguarded = options(0).with_duplicate_guard(false);
        let third = dispatch_reminders(storage.as_ref(), &notifier, today, &unguarded)
            .await
            .expect("third run");
        assert_eq!(third.emails_sent, 1);
        assert_eq!(logs(&storage).await.len(), 2);
    }

    #[test]
    fn test_days_before_due_bounds() {
        assert!(ReminderOptions::new(0).is_ok());
        assert!(ReminderOptions::new(60).is_ok());
        assert!(ReminderOptions::new(-1).is_err());
        assert!(ReminderOptions::new(61).is_err());

        let settings = super::super::JobSettings::default();
        assert_eq!(settings.reminder_options(None).expect("default").days_before_due(), 3);
        assert_eq!(settings.reminder_options(Some(7)).expect("explicit").days_before_due(), 7);
        assert!(settings.reminder_options(Some(90)).is_err());
    }
}
