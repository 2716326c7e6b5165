//! Connection settings for the Pinata API.

/// Default REST API origin.
pub const API_URL: &str = "https://api.pinata.cloud/v3";
/// Default upload origin.
pub const UPLOADS_URL: &str = "https://uploads.pinata.cloud/v3";

/// API client configuration, built once at process entry.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token. Absence is reported per call, not at startup.
    pub jwt: Option<String>,
    /// Dedicated gateway host, e.g. `example.mypinata.cloud`.
    pub gateway: Option<String>,
    pub api_url: String,
    pub uploads_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt: None,
            gateway: None,
            api_url: API_URL.into(),
            uploads_url: UPLOADS_URL.into(),
        }
    }
}

impl Config {
    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    /// Gateway origin with a scheme and without a trailing slash.
    pub fn gateway_origin(&self) -> Option<String> {
        let gateway = self.gateway.as_deref()?.trim().trim_end_matches('/');
        if gateway.is_empty() {
            return None;
        }
        if gateway.starts_with("http://") || gateway.starts_with("https://") {
            Some(gateway.to_string())
        } else {
            Some(format!("https://{gateway}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;

    #[test]
    fn gateway_origin_adds_scheme() {
        let config = Config::default().with_gateway("example.mypinata.cloud/");
        assert_eq!(
            config.gateway_origin().as_deref(),
            Some("https://example.mypinata.cloud")
        );
    }

    #[test]
    fn gateway_origin_keeps_scheme() {
        let config = Config::default().with_gateway("http://127.0.0.1:8080");
        assert_eq!(config.gateway_origin().as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(Config::default().with_gateway("  ").gateway_origin(), None);
    }
}
