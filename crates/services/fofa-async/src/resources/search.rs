use crate::{
    client::Client,
    config::Config,
    error::FofaError,
    types::search::{AssetFilter, SearchParams, SearchResponse},
};

/// API resource for the `/api/v1/search/all` endpoint
pub struct Search<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Search<'c, C> {
    /// Creates a new Search resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Executes one asset search for the given filter.
    ///
    /// A single GET is issued; a failed attempt is terminal (no retries).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns a non-2xx
    /// status or an undecodable body.
    pub async fn create(&self, filter: &AssetFilter) -> Result<SearchResponse, FofaError> {
        let params = SearchParams::from(filter);
        self.client.get_with_query("/api/v1/search/all", &params).await
    }
}

// Add accessor to client
impl<C: Config> crate::Client<C> {
    /// Returns the Search API resource
    #[must_use]
    pub const fn search(&self) -> Search<'_, C> {
        Search::new(self)
    }
}
