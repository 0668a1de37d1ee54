/// Errors from notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Email delivery errors.
    #[error("Email error: {0}")]
    Email(String),

    /// Missing or invalid notifier configuration.
    #[error("Notifier configuration error: {0}")]
    Config(String),
}
