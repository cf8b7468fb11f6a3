//! Input type for the asset-search tool.

use fofa_async::types::search::{AssetFilter, DEFAULT_STATUS_CODE};
use schemars::JsonSchema;
use serde::Deserialize;

/// Arguments accepted by the `search_assets` tool.
///
/// Every field is optional; an empty string and an absent field are
/// equivalent and contribute no filter clause.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssetSearchInput {
    /// Domain to search for, e.g. "example.com"
    pub domain: String,
    /// IP address to search for
    pub ip: String,
    /// Port to search for
    pub port: String,
    /// Hostname to search for
    pub host: String,
    /// Page body content to search for
    pub body: String,
    /// Favicon hash to search for
    pub icon_hash: String,
    /// ICP licence number to search for
    pub icp: String,
    /// HTTP status code filter; defaults to "200", pass "" to disable
    pub status_code: String,
}

impl Default for AssetSearchInput {
    fn default() -> Self {
        Self {
            domain: String::new(),
            ip: String::new(),
            port: String::new(),
            host: String::new(),
            body: String::new(),
            icon_hash: String::new(),
            icp: String::new(),
            status_code: DEFAULT_STATUS_CODE.into(),
        }
    }
}

impl AssetSearchInput {
    /// Converts the tool input into the client-side filter.
    #[must_use]
    pub fn into_filter(self) -> AssetFilter {
        AssetFilter {
            domain: self.domain,
            ip: self.ip,
            port: self.port,
            host: self.host,
            body: self.body,
            icon_hash: self.icon_hash,
            icp: self.icp,
            status_code: self.status_code,
        }
    }
}
