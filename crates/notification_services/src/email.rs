use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::types::NotificationError;

/// Trait for email service implementations
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Deliver one message; returns the provider's message id.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotificationError>;
}

/// Gmail-backed email service, initialized with sender credentials.
pub struct GmailEmailService {
    user: String,
    #[allow(dead_code)]
    password: String,
}

impl GmailEmailService {
    /// Create the service with the sender address and app password.
    pub fn new(user: String, password: String) -> Self {
        info!("Gmail notifier initialized for {}", user);
        Self { user, password }
    }
}

#[async_trait]
impl EmailService for GmailEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        info!("Sending email to {} with subject: {}", to, subject);

        // SMTP delivery is stubbed for now: log the outgoing message and
        // hand back a generated id.
        info!(
            "Email content:\nFrom: {}\nTo: {}\nSubject: {}\nBody: {}",
            self.user, to, subject, body
        );

        Ok(format!("gmail-{}", Uuid::new_v4()))
    }
}

/// Mock email service for development and testing.
pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        info!("[MOCK EMAIL] To: {}", to);
        info!("[MOCK EMAIL] Subject: {}", subject);
        info!("[MOCK EMAIL] Body:\n{}", body);

        Ok(format!("mock-email-{}", Uuid::new_v4()))
    }
}
