use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::FofaError};

/// Total request timeout applied to every outbound call
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// FOFA API client
///
/// The client is generic over a [`Config`] implementation that provides
/// authentication and API configuration. One failed attempt is terminal:
/// the client carries no retry policy.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::FofaConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables for authentication:
    /// - `FOFA_API_KEY` for the API credential
    /// - `FOFA_BASE_URL` for custom API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::FofaConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("reqwest client"),
            config,
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get_with_query<Q, O>(&self, path: &str, query: &Q) -> Result<O, FofaError>
    where
        Q: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let headers = self.config.headers()?;
        let request = self
            .http
            .get(self.config.url(path))
            .headers(headers)
            .query(&self.config.query())
            .query(query)
            .build()?;

        tracing::debug!(path, "issuing FOFA request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(FofaError::Reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(FofaError::Reqwest)?;

        if !status.is_success() {
            return Err(crate::error::deserialize_api_error(status, &bytes));
        }

        let resp: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(resp)
    }
}
