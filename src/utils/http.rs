// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::config::ImporterConfig;
use crate::error::Result;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ImporterConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL as text, attaching a bearer token when one is supplied.
pub async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
) -> Result<String> {
    let mut request = client.get(url);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    let text = request.send().await?.error_for_status()?.text().await?;
    Ok(text)
}

/// Fetch a URL as raw bytes, attaching a bearer token when one is supplied.
pub async fn fetch_bytes(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
) -> Result<Vec<u8>> {
    let mut request = client.get(url);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    let bytes = request.send().await?.error_for_status()?.bytes().await?;
    Ok(bytes.to_vec())
}
