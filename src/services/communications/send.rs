use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::CommunicationService;
use crate::models::communications::{
    entities::{CommunicationChannel, CommunicationKind, CommunicationStatus, NewCommunicationLog},
    requests::SendCommunicationRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::messages;
use crate::services::validation_failed;

const DEFAULT_SUBJECT: &str = "Message from your institute";

pub async fn send_communication(
    service: &CommunicationService,
    request: &HttpRequest,
    body: SendCommunicationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let notifier = service.get_notifier(request);

    let message = body.message.trim();
    if message.is_empty() {
        return Ok(validation_failed("Message cannot be empty"));
    }

    let (want_email, want_sms) = match body.channel {
        CommunicationChannel::Email => (true, false),
        CommunicationChannel::Sms => (false, true),
        CommunicationChannel::Both => (true, true),
        CommunicationChannel::NoChannel => {
            return Ok(validation_failed("channel must be email, sms or both"));
        }
    };

    if (want_email && !notifier.has_email()) || (want_sms && !notifier.has_sms()) {
        return Ok(
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::NotificationUnavailable,
                "Requested notification channel is not configured",
            )),
        );
    }

    let student = match storage.get_student_by_id(body.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    };

    let email_to = student.email_recipient().filter(|_| want_email);
    let phone_to = student.phone_recipient().filter(|_| want_sms);
    if (want_email && email_to.is_none()) || (want_sms && phone_to.is_none()) {
        return Ok(validation_failed(
            "Student has no contact details for the requested channel",
        ));
    }

    let subject = body
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT);

    let mut succeeded = 0;
    let mut failures = Vec::new();

    if let (Some(provider), Some(to)) = (&notifier.email, email_to) {
        match provider
            .send_email(&messages::manual_email(to, subject, message))
            .await
        {
            Ok(()) => succeeded += 1,
            Err(e) => failures.push(format!("email to {to} failed: {}", e.message())),
        }
    }
    if let (Some(provider), Some(to)) = (&notifier.sms, phone_to) {
        match provider.send_sms(&messages::manual_sms(to, message)).await {
            Ok(()) => succeeded += 1,
            Err(e) => failures.push(format!("SMS to {to} failed: {}", e.message())),
        }
    }

    let attempted = usize::from(email_to.is_some()) + usize::from(phone_to.is_some());
    let status = CommunicationStatus::from_outcome(attempted, succeeded);
    for failure in &failures {
        warn!("Manual message to student {}: {}", student.id, failure);
    }

    let log = NewCommunicationLog {
        student_id: Some(student.id),
        payment_id: None,
        kind: CommunicationKind::Manual,
        channel: CommunicationChannel::from_attempts(email_to.is_some(), phone_to.is_some()),
        recipient_email: email_to.map(str::to_string),
        recipient_phone: phone_to.map(str::to_string),
        subject: email_to.map(|_| subject.to_string()),
        message: message.to_string(),
        status,
        error: (!failures.is_empty()).then(|| failures.join("; ")),
    };

    let log = match storage.create_communication_log(log).await {
        Ok(log) => log,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to record communication: {e}"),
                )),
            );
        }
    };

    if status == CommunicationStatus::Failed {
        return Ok(HttpResponse::BadGateway().json(ApiResponse::error(
            ErrorCode::NotificationFailed,
            log,
            "Message delivery failed",
        )));
    }

    info!(
        "Manual message sent to student {} via {}",
        student.id, log.channel
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(log, "Message sent successfully")))
}
