use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, TimeDelta};
use reqwest::cookie::Jar;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::auth;
use crate::error::ParkanizerError;
use crate::secrets::{SecretsStore, SessionSecrets};
use crate::types::*;

/// Configuration for a Parkanizer session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the Parkanizer API.
    pub base_url: String,

    /// Where the token pair is persisted between invocations.
    pub secrets_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://share.parkanizer.com/api".to_string(),
            secrets_path: PathBuf::from("session_secrets.json"),
        }
    }
}

/// The remote domain operations used by caches and actions.
///
/// Implemented by [`Session`]; kept behind a trait so the booking layer can
/// be exercised against a mock service in tests.
#[async_trait]
pub trait ParkanizerApi: Send + Sync {
    /// List the parking spot zones visible to the caller.
    async fn get_zones(&self) -> Result<Vec<Zone>, ParkanizerError>;

    /// The caller's current reservations, passed through as raw entries.
    async fn get_my_reservations(&self) -> Result<Vec<serde_json::Value>, ParkanizerError>;

    /// The caller's booking calendar for a zone, scoped to the active
    /// reservation window (from today until the configured horizon).
    async fn get_spots(&self, zone_id: &str) -> Result<SpotsCalendarResponse, ParkanizerError>;

    /// The zone map with per-spot state for a date (today when `None`).
    async fn get_spots_map(
        &self,
        zone_id: &str,
        for_date: Option<NaiveDate>,
    ) -> Result<SpotZoneMapResponse, ParkanizerError>;

    /// Reserve a spot for a day. A `None` spot id asks the service to choose
    /// any available spot.
    async fn take_spot(
        &self,
        zone_id: &str,
        spot_id: Option<&str>,
        day: NaiveDate,
    ) -> Result<TakeSpotResponse, ParkanizerError>;

    /// Give up the caller's reservation for a day. Returns the raw response
    /// body; an empty body is the service's success signal.
    async fn release_spot(&self, day: NaiveDate) -> Result<String, ParkanizerError>;

    /// Employees that may receive a cancelled reservation.
    async fn get_beneficiaries(
        &self,
        for_date: NaiveDate,
    ) -> Result<Vec<Employee>, ParkanizerError>;
}

/// Authenticated channel to the Parkanizer service.
///
/// Owns the HTTP session state (bearer token and refresh cookie) and the
/// secrets store, and exposes the remote operations as typed calls. Shared
/// read-mostly by every cache and action of one command invocation.
pub struct Session {
    client: Client,
    jar: Arc<Jar>,
    bearer_token: RwLock<Option<String>>,
    secrets_store: SecretsStore,
    config: SessionConfig,
}

impl Session {
    /// Create a session with a cookie-backed HTTP client.
    pub fn new(config: Option<SessionConfig>) -> Result<Self, ParkanizerError> {
        let config = config.unwrap_or_default();

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ParkanizerError::Api(format!("Failed to create session client: {}", e))
            })?;

        let secrets_store = SecretsStore::new(config.secrets_path.clone());

        Ok(Self {
            client,
            jar,
            bearer_token: RwLock::new(None),
            secrets_store,
            config,
        })
    }

    /// Authenticate, preferring the persisted token pair over credentials.
    ///
    /// Stored secrets are validated with a refresh round trip; any failure to
    /// load, parse or refresh them falls back to credential login against the
    /// auth endpoint. Either successful path rewrites the secrets store.
    /// Both paths failing is fatal for the invoking command.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, ParkanizerError> {
        let secrets = match self.try_stored_secrets().await {
            Ok(secrets) => {
                info!("Successfully authenticated with stored secrets");
                secrets
            }
            Err(e) => {
                info!(
                    "Failed to authenticate with stored secrets ({}). Trying with normal login.",
                    e
                );
                let secrets =
                    auth::get_token(&self.client, &self.config.base_url, username, password)
                        .await?;
                self.install_secrets(&secrets).await?;
                info!("Authenticated with username and password");
                secrets
            }
        };

        self.secrets_store.save(&secrets)?;
        Ok(true)
    }

    async fn try_stored_secrets(&self) -> Result<SessionSecrets, ParkanizerError> {
        info!("Trying to authenticate with stored secrets");
        let stored = self.secrets_store.load()?;
        self.install_secrets(&stored).await?;
        self.try_refresh_token().await
    }

    /// Ask the service for a fresh token pair using the current refresh
    /// cookie.
    async fn try_refresh_token(&self) -> Result<SessionSecrets, ParkanizerError> {
        let url = format!("{}/auth0/try-refresh-token", self.config.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .await
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| ParkanizerError::Network(format!("Token refresh failed: {}", e)))?;

        Self::map_status(response.status())?;

        let refresh_cookie = response
            .cookies()
            .find(|cookie| cookie.name() == "refresh_token")
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                ParkanizerError::DataFormat(
                    "Refresh response carried no refresh_token cookie".to_string(),
                )
            })?;

        let body: RefreshTokenResponse = response.json().await.map_err(|e| {
            ParkanizerError::DataFormat(format!("Failed to parse refresh response: {}", e))
        })?;
        let token = body
            .new_token_or_null
            .ok_or(ParkanizerError::AuthenticationFailed)?;

        let secrets = SessionSecrets {
            bearer_token: token.access_token,
            refresh_cookie,
        };
        self.install_secrets(&secrets).await?;
        Ok(secrets)
    }

    /// Make a token pair the session's current credentials.
    async fn install_secrets(&self, secrets: &SessionSecrets) -> Result<(), ParkanizerError> {
        *self.bearer_token.write().await = Some(secrets.bearer_token.clone());

        let url = Url::parse(&self.config.base_url)
            .map_err(|e| ParkanizerError::ConfigError(format!("Invalid base URL: {}", e)))?;
        self.jar.add_cookie_str(
            &format!("refresh_token={}", secrets.refresh_cookie),
            &url,
        );
        Ok(())
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer_token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn map_status(status: StatusCode) -> Result<(), ParkanizerError> {
        if status.is_success() {
            return Ok(());
        }
        match status.as_u16() {
            429 => Err(ParkanizerError::RateLimited),
            401 | 403 => Err(ParkanizerError::AuthenticationFailed),
            404 => Err(ParkanizerError::NotFound),
            _ => Err(ParkanizerError::Api(format!("HTTP {}", status))),
        }
    }

    /// POST a JSON payload and parse the JSON response.
    async fn post_json<B, T>(&self, url: &str, payload: &B) -> Result<T, ParkanizerError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.client.post(url))
            .await
            .json(payload)
            .send()
            .await
            .map_err(|e| ParkanizerError::Network(format!("HTTP request failed: {}", e)))?;

        Self::map_status(response.status())?;

        response
            .json()
            .await
            .map_err(|e| ParkanizerError::DataFormat(format!("Failed to parse response: {}", e)))
    }

    /// POST a JSON payload and return the raw response body.
    async fn post_raw<B>(&self, url: &str, payload: &B) -> Result<String, ParkanizerError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self
            .authorize(self.client.post(url))
            .await
            .json(payload)
            .send()
            .await
            .map_err(|e| ParkanizerError::Network(format!("HTTP request failed: {}", e)))?;

        Self::map_status(response.status())?;

        response
            .text()
            .await
            .map_err(|e| ParkanizerError::Network(format!("Failed to read response body: {}", e)))
    }

    /// GET and parse the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ParkanizerError> {
        let response = self
            .authorize(self.client.get(url))
            .await
            .send()
            .await
            .map_err(|e| ParkanizerError::Network(format!("HTTP request failed: {}", e)))?;

        Self::map_status(response.status())?;

        response
            .json()
            .await
            .map_err(|e| ParkanizerError::DataFormat(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ParkanizerApi for Session {
    async fn get_zones(&self) -> Result<Vec<Zone>, ParkanizerError> {
        let url = format!("{}/marketplace/get-parking-spot-zones", self.config.base_url);
        let response: ZonesResponse = self.post_json(&url, &serde_json::json!({})).await?;
        Ok(response.parking_spot_zones)
    }

    async fn get_my_reservations(&self) -> Result<Vec<serde_json::Value>, ParkanizerError> {
        let url = format!(
            "{}/employee-reservations/get-employee-reservations",
            self.config.base_url
        );
        let response: MyReservationsResponse = self.get_json(&url).await?;
        Ok(response.reservations)
    }

    async fn get_spots(&self, zone_id: &str) -> Result<SpotsCalendarResponse, ParkanizerError> {
        debug!("Fetching booking calendar for zone {}", zone_id);
        let url = format!("{}/marketplace/get-spots", self.config.base_url);
        let payload = GetSpotsRequest {
            parking_spot_zone_id: zone_id.to_string(),
            booking_time_interval: BookingTimeInterval::default(),
        };
        self.post_json(&url, &payload).await
    }

    async fn get_spots_map(
        &self,
        zone_id: &str,
        for_date: Option<NaiveDate>,
    ) -> Result<SpotZoneMapResponse, ParkanizerError> {
        let for_date = for_date.unwrap_or_else(|| Local::now().date_naive());
        debug!("Fetching zone map for zone {} on {}", zone_id, for_date);
        let url = format!(
            "{}/marketplace/get-marketplace-parking-spot-zone-map",
            self.config.base_url
        );
        let payload = GetSpotsMapRequest {
            parking_spot_zone_id: zone_id.to_string(),
            date: for_date,
            booking_time_interval: BookingTimeInterval::default(),
        };
        self.post_json(&url, &payload).await
    }

    async fn take_spot(
        &self,
        zone_id: &str,
        spot_id: Option<&str>,
        day: NaiveDate,
    ) -> Result<TakeSpotResponse, ParkanizerError> {
        info!("Taking spot {:?} for {} (in {})", spot_id, day, zone_id);
        let url = format!(
            "{}/employee-reservations/take-spot-from-marketplace",
            self.config.base_url
        );
        let payload = TakeSpotWireRequest {
            day_to_take: day,
            parking_spot_zone_id: zone_id.to_string(),
            parking_spot_id_or_null: spot_id.map(str::to_string),
            booking_time_interval: BookingTimeInterval::default(),
        };
        self.post_json(&url, &payload).await
    }

    async fn release_spot(&self, day: NaiveDate) -> Result<String, ParkanizerError> {
        info!("Releasing spot for {}", day);
        let url = format!("{}/employee-reservations/resign", self.config.base_url);
        let payload = ResignWireRequest {
            days_to_share: vec![day],
            receiving_employee_id_or_null: None,
        };
        self.post_raw(&url, &payload).await
    }

    async fn get_beneficiaries(
        &self,
        for_date: NaiveDate,
    ) -> Result<Vec<Employee>, ParkanizerError> {
        info!("Fetching beneficiaries for {}", for_date);
        let url = format!(
            "{}/employee-reservations/get-employees",
            self.config.base_url
        );
        let payload = GetEmployeesRequest {
            days_to_share: vec![for_date + TimeDelta::days(1)],
        };
        let response: EmployeesResponse = self.post_json(&url, &payload).await?;
        Ok(response.employees_or_null.unwrap_or_default())
    }
}
