use failure::Error;
use log::{error, info};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

pub const BASE_URL: &str = "https://apiavl.easytrack.com.ar";

// The upstream exposes no documented deadline; cap each call so a stalled
// refresh cannot hang the /update request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the EasyTrack AVL API. One instance lives for the whole
/// process; tokens do not, they are fetched per refresh cycle.
pub struct EasyTrackClient {
    http: reqwest::Client,
    base: Url,
    username: String,
    password: String,
}

impl EasyTrackClient {
    pub fn new(base: Url, username: String, password: String) -> EasyTrackClient {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Unable to build HTTP client");
        EasyTrackClient {
            http,
            base,
            username,
            password,
        }
    }

    /// Exchanges the configured credentials for a JWT. Every failure mode
    /// (transport, non-2xx, missing field) is an authentication failure and
    /// aborts the refresh cycle.
    pub async fn fetch_token(&self) -> Result<String, Error> {
        self.try_fetch_token().await.map_err(|e| {
            error!("Error retrieving token: {}", e);
            format_err!("Authentication failed")
        })
    }

    async fn try_fetch_token(&self) -> Result<String, Error> {
        let response = self
            .http
            .post(self.base.join("/sessions/auth/")?.as_str())
            .json(&json!({
                "username": self.username,
                "password": self.password,
            }))
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;
        body["jwt"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| format_err!("Missing jwt field in auth response"))
    }

    /// Most recent normalized address for a plate, or `None`. Errors are
    /// logged and swallowed here so one vehicle cannot abort the batch.
    pub async fn fetch_location(&self, token: &str, plate: &str) -> Option<String> {
        match self.try_fetch_location(token, plate).await {
            Ok(Some(address)) => {
                info!("Bus {} location: {}", plate, address);
                Some(address)
            }
            Ok(None) => {
                info!("No position found for {}", plate);
                None
            }
            Err(e) => {
                error!("Error fetching location for {}: {}", plate, e);
                None
            }
        }
    }

    async fn try_fetch_location(&self, token: &str, plate: &str) -> Result<Option<String>, Error> {
        let response = self
            .http
            .get(self.base.join(&format!("/positions/{}", plate))?.as_str())
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?
            .error_for_status()?;
        let records: Value = response.json().await?;
        Ok(extract_address(&records))
    }
}

/// Pulls the address out of a positions response: first record only, first
/// two comma-separated fields of its `position` string, trimmed.
fn extract_address(records: &Value) -> Option<String> {
    let position = records[0]["position"].as_str()?;
    if position.is_empty() {
        return None;
    }
    let address = position
        .split(',')
        .take(2)
        .collect::<Vec<&str>>()
        .join(",")
        .trim()
        .to_string();
    Some(address)
}
