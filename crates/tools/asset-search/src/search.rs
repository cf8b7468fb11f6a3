//! The asset-search tool orchestration.
//!
//! One outbound search per invocation, behind a fail-soft boundary: the
//! caller always receives a [`SearchReply`] or a hard [`ToolError`] for
//! structural faults — never a propagated transport failure.

use fofa_async::{Client, FofaConfig};
use uuid::Uuid;

use crate::error::ToolError;
use crate::fmt::{AssetRecord, format_assets};
use crate::types::AssetSearchInput;

/// Reply when the request fails or times out (the transport sentinel)
pub const SEARCH_FAILED: &str = "request failed or no response";
/// Reply when the response carries no usable results
pub const NO_MATCHING_ASSETS: &str = "no matching assets found";

/// Shared state for the asset-search tool.
#[derive(Debug, Clone)]
pub struct AssetSearchTools {
    client: Client<FofaConfig>,
}

impl AssetSearchTools {
    /// Creates tool state from environment configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FofaConfig::new())
    }

    /// Creates tool state with an explicit configuration.
    #[must_use]
    pub fn with_config(config: FofaConfig) -> Self {
        Self {
            client: Client::with_config(config),
        }
    }
}

impl Default for AssetSearchTools {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one tool invocation.
///
/// Tagged internally; the legacy untagged projection (bare string on
/// success, `{"error": …}` object otherwise) happens at the protocol
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchReply {
    /// Formatted asset report
    Report(String),
    /// Structured failure message
    Failed(&'static str),
}

/// Runs one asset search and formats the result.
///
/// Any transport-level failure is logged and collapsed into
/// [`SearchReply::Failed`]. The only hard error is a malformed result row
/// (not exactly hostname/address/port), which is a structural fault in
/// the upstream data.
///
/// # Errors
///
/// Returns [`ToolError::Internal`] when a result row is malformed.
pub async fn search_assets(
    tools: &AssetSearchTools,
    input: AssetSearchInput,
) -> Result<SearchReply, ToolError> {
    let request_id = Uuid::new_v4();
    let filter = input.into_filter();

    tracing::debug!(%request_id, query = filter.to_expression().as_deref(), "searching assets");

    let response = match tools.client.search().create(&filter).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(%request_id, error = %e, "asset search request failed");
            return Ok(SearchReply::Failed(SEARCH_FAILED));
        }
    };

    let rows = match response.results {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            tracing::warn!(
                %request_id,
                errmsg = response.errmsg.as_deref().unwrap_or_default(),
                "search returned no usable results"
            );
            return Ok(SearchReply::Failed(NO_MATCHING_ASSETS));
        }
    };

    let records = rows
        .into_iter()
        .map(AssetRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchReply::Report(format_assets(&records)))
}
