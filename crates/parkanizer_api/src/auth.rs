use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ParkanizerError;
use crate::secrets::SessionSecrets;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

/// Exchange credentials for a fresh token pair at the auth endpoint.
///
/// The access token comes back in the JSON body; the refresh token arrives
/// as a `refresh_token` cookie on the response.
pub(crate) async fn get_token(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<SessionSecrets, ParkanizerError> {
    info!("Authenticating with username and password");

    let url = format!("{}/auth0/login", base_url);
    let response = client
        .post(&url)
        .json(&LoginRequest {
            email: username,
            password,
        })
        .send()
        .await
        .map_err(|e| ParkanizerError::Network(format!("Login request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(ParkanizerError::AuthenticationFailed);
    }

    let refresh_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "refresh_token")
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            ParkanizerError::DataFormat(
                "Login response carried no refresh_token cookie".to_string(),
            )
        })?;

    let body: LoginResponse = response.json().await.map_err(|e| {
        ParkanizerError::DataFormat(format!("Failed to parse login response: {}", e))
    })?;

    Ok(SessionSecrets {
        bearer_token: body.access_token,
        refresh_cookie,
    })
}
