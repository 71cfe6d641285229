use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{AppVersion, Settings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pick the message out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// API client for the settings service
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn settings_url(&self, app_slug: &str) -> String {
        format!("{}/api/apps/{}/settings", self.base_url, app_slug)
    }

    pub fn latest_version_url(&self, app_slug: &str) -> String {
        format!("{}/api/apps/{}/versions/latest", self.base_url, app_slug)
    }

    /// Fetch the current settings of an app
    pub async fn get_settings(&self, app_slug: &str) -> Result<Settings, ApiError> {
        let response = Request::get(&self.settings_url(app_slug))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    /// Persist settings and return them as stored by the service
    pub async fn update_settings(&self, app_slug: &str, settings: &Settings) -> Result<Settings, ApiError> {
        let response = Request::put(&self.settings_url(app_slug))
            .json(settings)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    /// Fetch the most recent version of an app
    pub async fn get_latest_app_version(&self, app_slug: &str) -> Result<AppVersion, ApiError> {
        let response = Request::get(&self.latest_version_url(app_slug))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status,
                message: error_message(&body),
            })
        }
    }
}
