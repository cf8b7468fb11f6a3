//! Conversion of wire rows into asset records and report formatting.

use crate::error::ToolError;

/// One discovered network-exposed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Hostname of the asset
    pub host: String,
    /// IP address of the asset
    pub address: String,
    /// Port the service listens on
    pub port: String,
}

impl TryFrom<Vec<String>> for AssetRecord {
    type Error = ToolError;

    // Rows must be exactly (hostname, address, port); anything else is a
    // structural fault in the upstream data, surfaced as a hard error
    // rather than skipped.
    fn try_from(row: Vec<String>) -> Result<Self, Self::Error> {
        let mut it = row.into_iter();
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(host), Some(address), Some(port), None) => Ok(Self {
                host,
                address,
                port,
            }),
            _ => Err(ToolError::internal(
                "malformed asset record: expected exactly 3 fields",
            )),
        }
    }
}

/// Formats asset records into a readable multi-line report.
///
/// Each record becomes a 3-line block; blocks are separated by one blank
/// line. An empty slice yields the empty string.
#[must_use]
pub fn format_assets(records: &[AssetRecord]) -> String {
    let blocks: Vec<String> = records
        .iter()
        .map(|r| format!("Host: {}\nAddress: {}\nPort: {}\n", r.host, r.address, r.port))
        .collect();
    blocks.join("\n")
}
