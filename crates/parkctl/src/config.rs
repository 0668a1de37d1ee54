use std::env;
use std::path::PathBuf;

use parkanizer_api::ParkanizerError;

/// Gmail notifier settings: sender credentials and recipients.
#[derive(Debug, Clone)]
pub struct GmailConfig {
    /// Sender address.
    pub user: String,
    /// App password for the sender account.
    pub password: String,
    /// Recipient addresses.
    pub recipients: Vec<String>,
}

/// Fully-resolved runtime configuration, loaded from the environment
/// (with `.env` support through dotenvy at startup).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Parkanizer account name.
    pub user: String,
    /// Parkanizer account password.
    pub password: String,
    /// Default zone for every booking command.
    pub zone: String,
    /// Default ordered spot preference list.
    pub spots: Vec<String>,
    /// Default look-ahead in days for the book-free sweep.
    pub look_ahead: i64,
    /// Where the session token pair is persisted.
    pub secrets_path: PathBuf,
    /// Email notifier settings, when configured.
    pub gmail: Option<GmailConfig>,
}

fn require_env(name: &str) -> Result<String, ParkanizerError> {
    env::var(name)
        .map_err(|_| ParkanizerError::ConfigError(format!("{} environment variable not set", name)))
}

/// Split a comma-separated spot list, trimming whitespace and surrounding
/// single quotes from each name.
pub fn parse_spot_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.trim().trim_matches('\'').to_string())
        .collect()
}

/// Split a comma-separated recipient list.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|recipient| recipient.trim().to_string())
        .filter(|recipient| !recipient.is_empty())
        .collect()
}

impl AppConfig {
    /// Load and validate the configuration from the process environment.
    pub fn from_env() -> Result<Self, ParkanizerError> {
        let spots = parse_spot_names(&require_env("SPOT_NAMES")?);

        let look_ahead = match env::var("LOOK_AHEAD") {
            Ok(value) => value.parse::<i64>().map_err(|e| {
                ParkanizerError::ConfigError(format!("Invalid LOOK_AHEAD value: {}", e))
            })?,
            Err(_) => 0,
        };

        let secrets_path = env::var("SESSION_SECRETS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("session_secrets.json"));

        Ok(Self {
            user: require_env("PARKANIZER_USER")?,
            password: require_env("PARKANIZER_PASSWORD")?,
            zone: require_env("SPOT_ZONE")?,
            spots,
            look_ahead,
            secrets_path,
            gmail: Self::gmail_from_env()?,
        })
    }

    /// The Gmail notifier group. Enabled only when the full
    /// `NOTIFIERS_GMAIL_*` triple is present; a partial group is a
    /// configuration error rather than a silent no-op.
    fn gmail_from_env() -> Result<Option<GmailConfig>, ParkanizerError> {
        let user = env::var("NOTIFIERS_GMAIL_USER").ok();
        let password = env::var("NOTIFIERS_GMAIL_PASSWORD").ok();
        let recipient = env::var("NOTIFIERS_GMAIL_RECIPIENT").ok();

        match (user, password, recipient) {
            (Some(user), Some(password), Some(recipient)) => Ok(Some(GmailConfig {
                user,
                password,
                recipients: parse_recipients(&recipient),
            })),
            (None, None, None) => Ok(None),
            _ => Err(ParkanizerError::ConfigError(
                "NOTIFIERS_GMAIL_USER, NOTIFIERS_GMAIL_PASSWORD and NOTIFIERS_GMAIL_RECIPIENT \
                 must be set together"
                    .to_string(),
            )),
        }
    }
}
