//! # HTTP Transport
//!
//! The [`ApiClient`] wraps a [`reqwest::Client`] with the JSON conventions
//! the collaborator uses: JSON bodies both ways, a `{ "data": ... }`
//! envelope on single-resource responses, and error bodies carrying a
//! `message` string.
//!
//! Endpoint methods live in the entity modules ([`crate::products`],
//! [`crate::sales`], [`crate::categories`], [`crate::reports`]); this
//! module only provides the shared request plumbing.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{api_error, ClientResult};

/// The `{ "data": ... }` wrapper the collaborator puts around
/// single-resource responses. Paged lists carry their page fields at the
/// top level instead and skip this envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// HTTP client for the remote API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Builds a client from explicit configuration.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "API client ready");
        Ok(ApiClient { http, config })
    }

    /// Builds a client from the standard config locations
    /// (environment, config file, defaults).
    pub fn from_default_config() -> ClientResult<Self> {
        Self::new(ApiConfig::load()?)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolves an endpoint path, optionally appending query parameters.
    pub(crate) fn url(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Url> {
        let mut url = self.config.endpoint(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    // =========================================================================
    // JSON Helpers
    // =========================================================================

    /// GET `path` and decode the response body as `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.url(path, query)?;
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the response as `T`.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path, &[])?;
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    /// PUT `body` as JSON to `path` and decode the response as `T`.
    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path, &[])?;
        debug!(%url, "PUT");
        let response = self.http.put(url).json(body).send().await?;
        Self::decode(response).await
    }

    /// DELETE `path`, discarding any response body.
    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path, &[])?;
        debug!(%url, "DELETE");
        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// POST `body` as JSON to `path`, discarding any response body.
    pub(crate) async fn post_json_no_response<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        let url = self.url(path, &[])?;
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    /// Turns a non-success response into [`crate::ClientError::Api`],
    /// passing successful responses through.
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "Request rejected");
        Err(api_error(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check(response).await?;
        // 204 carries no body; decode as JSON null for Option targets.
        if response.status() == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| crate::ClientError::InvalidResponse(e.to_string()));
        }
        Ok(response.json().await?)
    }
}
