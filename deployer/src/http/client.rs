//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use appveyor_api::models::ErrorResponse;

use crate::errors::DeployError;

/// HTTP client for the AppVeyor API
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpClient {
    /// Create a new HTTP client authenticating with `api_key`
    pub fn new(base_url: &str, api_key: SecretString, timeout: Duration) -> Result<Self, DeployError> {
        Url::parse(base_url)
            .map_err(|e| DeployError::ConfigError(format!("invalid API base URL '{}': {}", base_url, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DeployError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.bearer())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = check_status("GET", response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DeployError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.bearer())
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let response = check_status("POST", response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }
}

async fn check_status(method: &str, response: Response) -> Result<Response, DeployError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    error!("HTTP {} failed: {} - {}", method, status, message);
    Err(DeployError::ApiError(format!("{}: {}", status, message)))
}
