//! Thin HTTP wrapper over reqwest.
//!
//! One attempt per call, no retries and no backoff: a failed request is a
//! terminal signal for that call, reported as a typed error for the caller
//! to abort or skip on.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::CentralError;

/// Single-attempt JSON HTTP client.
#[derive(Debug, Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, CentralError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CentralError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// POST a JSON body, without authentication. Used only for login.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, CentralError> {
        let request = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(body);

        Self::dispatch(url, request).await
    }

    /// GET with bearer auth and query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        bearer: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CentralError> {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .bearer_auth(bearer)
            .query(query);

        Self::dispatch(url, request).await
    }

    /// Send the request and decode the JSON body, mapping each failure mode
    /// to its own error variant.
    async fn dispatch<T: DeserializeOwned>(
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CentralError> {
        let response = request.send().await.map_err(|e| CentralError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CentralError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| CentralError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| CentralError::JsonParse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
