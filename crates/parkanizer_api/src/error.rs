/// Custom error type for Parkanizer client operations
#[derive(Debug, thiserror::Error)]
pub enum ParkanizerError {
    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// Rate limited by the service
    #[error("Rate limited by Parkanizer")]
    RateLimited,

    /// Authentication failed
    #[error("Authentication failed with Parkanizer")]
    AuthenticationFailed,

    /// Resource not found
    #[error("Resource not found")]
    NotFound,

    /// Data format error
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Secrets store error
    #[error("Secrets store error: {0}")]
    SecretsStore(String),
}
