use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};

/// Default FOFA API base URL
pub const FOFA_DEFAULT_BASE: &str = "https://fofa.info";
/// User-Agent value sent with every request
pub const FOFA_USER_AGENT: &str = "fofa-app/1.0";
/// Accept value sent with every request
pub const FOFA_ACCEPT: &str = "application/geo+json";
/// Query parameter carrying the API credential
pub const PARAM_KEY: &str = "key";

/// Configuration for the FOFA client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct FofaConfig {
    api_base: String,
    api_key: Option<SecretString>,
}

impl Default for FofaConfig {
    fn default() -> Self {
        let api_key = std::env::var("FOFA_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let api_base = std::env::var("FOFA_BASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| FOFA_DEFAULT_BASE.into());

        Self { api_base, api_key }
    }
}

impl FofaConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `FOFA_API_KEY` for the API credential
    /// - `FOFA_BASE_URL` for custom API base URL (defaults to `https://fofa.info`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the FOFA client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::FofaError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Returns query parameters to include in requests
    fn query(&self) -> Vec<(&str, &str)>;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), crate::error::FofaError>;
}

impl Config for FofaConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::FofaError> {
        let mut h = HeaderMap::new();
        h.insert(USER_AGENT, HeaderValue::from_static(FOFA_USER_AGENT));
        h.insert(ACCEPT, HeaderValue::from_static(FOFA_ACCEPT));
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    // The FOFA credential travels as a query parameter, not a header.
    fn query(&self) -> Vec<(&str, &str)> {
        match &self.api_key {
            Some(secret) => {
                let key = secret.expose_secret().trim();
                if key.is_empty() {
                    vec![]
                } else {
                    vec![(PARAM_KEY, key)]
                }
            }
            None => vec![],
        }
    }

    fn validate_auth(&self) -> Result<(), crate::error::FofaError> {
        match &self.api_key {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(crate::error::FofaError::Config(
                "Missing FOFA credentials: set FOFA_API_KEY environment variable".into(),
            )),
        }
    }
}
