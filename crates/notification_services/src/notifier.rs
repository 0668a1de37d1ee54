use std::sync::Arc;

use spot_booking::{EventKind, EventPayload};
use tracing::{debug, warn};

use crate::email::EmailService;
use crate::format::{error_text, format_result};

const RESERVATIONS_URL: &str = "https://share.parkanizer.com/reservations-list";

/// Renders action events into messages and fans them out to the configured
/// recipients through an [`EmailService`].
///
/// Delivery failures are logged per recipient and never propagated back
/// into action results.
pub struct EmailNotifier {
    service: Arc<dyn EmailService>,
    recipients: Vec<String>,
}

impl EmailNotifier {
    /// Create a notifier sending through `service` to `recipients`.
    pub fn new(service: Arc<dyn EmailService>, recipients: Vec<String>) -> Self {
        Self {
            service,
            recipients,
        }
    }

    fn message_body(kind: EventKind, payload: &EventPayload) -> String {
        match payload {
            EventPayload::Error { error } => {
                format!("Parkanizer Bot notification: Error! {}", error)
            }
            EventPayload::Result(result) if kind == EventKind::Error => {
                let detail = error_text(result).unwrap_or("unknown error");
                format!("Parkanizer Bot notification: Error! {}", detail)
            }
            EventPayload::Result(result) => format_result(result),
            EventPayload::Messages(messages) => messages.join("\n"),
        }
    }

    /// Render and deliver one event to every recipient.
    pub async fn notify(&self, kind: EventKind, payload: &EventPayload) {
        debug!("Sending notification for {} event", kind);

        let subject = "Parkanizer Bot notification";
        let mut body = Self::message_body(kind, payload);
        body.push_str("\n\n ");
        body.push_str(RESERVATIONS_URL);

        for recipient in &self.recipients {
            match self.service.send_email(recipient, subject, &body).await {
                Ok(id) => debug!("Notification sent to {} ({})", recipient, id),
                Err(e) => warn!("Failed to notify {}: {}", recipient, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use spot_booking::{ActionResult, ReleaseOutcome, ReleaseSpotRequest};

    use super::*;
    use crate::types::NotificationError;

    #[derive(Default)]
    struct RecordingEmailService {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl EmailService for RecordingEmailService {
        async fn send_email(
            &self,
            to: &str,
            _subject: &str,
            body: &str,
        ) -> Result<String, NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), body.to_string()));
            Ok("recorded".to_string())
        }
    }

    fn release_result() -> ActionResult {
        ActionResult::ReleaseSpot {
            request: ReleaseSpotRequest {
                for_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            },
            result: ReleaseOutcome::Success {
                message: "Released spot for 2026-08-10 successfully".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn every_recipient_gets_the_rendered_message() {
        let service = Arc::new(RecordingEmailService::default());
        let notifier = EmailNotifier::new(
            service.clone(),
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
        );

        notifier
            .notify(
                EventKind::Success,
                &EventPayload::Result(Box::new(release_result())),
            )
            .await;

        let sent = service.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "a@example.com");
        assert!(sent[0].1.contains("Spot for 2026-08-10 was released."));
        assert!(sent[0].1.contains(RESERVATIONS_URL));
    }

    #[tokio::test]
    async fn error_events_render_the_error_detail() {
        let service = Arc::new(RecordingEmailService::default());
        let notifier = EmailNotifier::new(service.clone(), vec!["a@example.com".to_string()]);

        notifier
            .notify(
                EventKind::Error,
                &EventPayload::Error {
                    error: "connection reset".to_string(),
                },
            )
            .await;

        let sent = service.sent.lock().unwrap();
        assert!(sent[0].1.contains("Error! connection reset"));
    }
}
