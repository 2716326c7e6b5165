//! Shared request plumbing.

use crate::{ApiError, Config};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;

/// Authenticated client for the Pinata API.
#[derive(Debug, Clone)]
pub struct PinataClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<Config>,
}

/// Which origin a request targets.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Origin {
    Api,
    Uploads,
}

impl PinataClient {
    /// Build a client from configuration.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pinata-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn jwt(&self) -> Result<&str, ApiError> {
        self.config
            .jwt
            .as_deref()
            .filter(|jwt| !jwt.is_empty())
            .ok_or(ApiError::MissingJwt)
    }

    pub(crate) fn url(&self, origin: Origin, path: &str) -> String {
        let base = match origin {
            Origin::Api => &self.config.api_url,
            Origin::Uploads => &self.config.uploads_url,
        };
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Start an authenticated request. Fails before any I/O without a token.
    pub(crate) fn request(
        &self,
        method: Method,
        origin: Origin,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let jwt = self.jwt()?;
        let url = self.url(origin, path);
        tracing::debug!(%method, %url, "pinata request");
        Ok(self.http.request(method, url).bearer_auth(jwt))
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-2xx statuses become [`ApiError::Status`] labelled with `action`.
    /// An empty body decodes to `null`.
    pub(crate) async fn send(
        &self,
        action: &'static str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%status, action, "pinata request failed");
            return Err(ApiError::Status {
                action,
                status,
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn call(
        &self,
        action: &'static str,
        method: Method,
        path: &str,
    ) -> Result<Value, ApiError> {
        let request = self.request(method, Origin::Api, path)?;
        self.send(action, request).await
    }
}
