//! # Parkanizer API
//!
//! Typed client for the Parkanizer parking-reservation service.
//! It owns the authenticated HTTP session (bearer token and refresh cookie),
//! the on-disk secrets store that lets subsequent invocations skip
//! interactive login, and the remote domain operations used by the booking
//! layer.

/// Credential-based login against the auth endpoint.
mod auth;
/// Error taxonomy for client operations.
mod error;
/// On-disk persistence for the session token pair.
mod secrets;
/// The authenticated session and the remote operations trait.
mod session;
/// Wire-level request and response structures.
mod types;

pub use error::*;
pub use secrets::*;
pub use session::*;
pub use types::*;
