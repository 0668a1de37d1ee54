//! # Notification Services
//!
//! Renders action events into human-readable messages and delivers them by
//! email. The booking core only raises events; everything about turning an
//! event into a message and getting it to a mailbox lives here.

/// Email service trait and implementations.
pub mod email;
/// Human rendering of action results.
pub mod format;
/// The event-consuming email notifier.
pub mod notifier;
/// Notification error types.
pub mod types;

pub use email::{EmailService, GmailEmailService, MockEmailService};
pub use format::format_result;
pub use notifier::EmailNotifier;
pub use types::NotificationError;
