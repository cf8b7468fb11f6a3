//! Types for the FOFA `/api/v1/search/all` endpoint

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Default HTTP status-code clause value
pub const DEFAULT_STATUS_CODE: &str = "200";
/// Fixed page size requested on every search
pub const PAGE_SIZE: u32 = 1000;

/// Filter terms for an asset search.
///
/// Every field is optional; empty fields contribute no clause. Non-empty
/// fields are combined with logical AND in a fixed order: domain, ip, port,
/// host, body, `icon_hash`, icp, `status_code`. Values are passed through
/// uninspected (embedded quotes are not escaped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFilter {
    /// Domain filter, e.g. `example.com`
    pub domain: String,
    /// IP address filter
    pub ip: String,
    /// Port filter
    pub port: String,
    /// Hostname filter
    pub host: String,
    /// Page body content filter
    pub body: String,
    /// Favicon hash filter
    pub icon_hash: String,
    /// ICP licence number filter
    pub icp: String,
    /// HTTP status-code filter; defaults to `200`, clear to empty to drop
    pub status_code: String,
}

impl Default for AssetFilter {
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

impl AssetFilter {
    /// Creates a filter with only the default `status_code=200` clause
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the domain filter
    #[must_use]
    pub fn with_domain(mut self, v: impl Into<String>) -> Self {
        self.domain = v.into();
        self
    }

    /// Sets the IP filter
    #[must_use]
    pub fn with_ip(mut self, v: impl Into<String>) -> Self {
        self.ip = v.into();
        self
    }

    /// Sets the port filter
    #[must_use]
    pub fn with_port(mut self, v: impl Into<String>) -> Self {
        self.port = v.into();
        self
    }

    /// Sets the hostname filter
    #[must_use]
    pub fn with_host(mut self, v: impl Into<String>) -> Self {
        self.host = v.into();
        self
    }

    /// Sets the body content filter
    #[must_use]
    pub fn with_body(mut self, v: impl Into<String>) -> Self {
        self.body = v.into();
        self
    }

    /// Sets the favicon hash filter
    #[must_use]
    pub fn with_icon_hash(mut self, v: impl Into<String>) -> Self {
        self.icon_hash = v.into();
        self
    }

    /// Sets the ICP licence filter
    #[must_use]
    pub fn with_icp(mut self, v: impl Into<String>) -> Self {
        self.icp = v.into();
        self
    }

    /// Sets the status-code filter; pass `""` to drop the clause entirely
    #[must_use]
    pub fn with_status_code(mut self, v: impl Into<String>) -> Self {
        self.status_code = v.into();
        self
    }

    /// Returns the filter clauses in their fixed emission order.
    ///
    /// Quoted `field="value"` for text fields; `status_code` is emitted
    /// unquoted.
    #[must_use]
    pub fn clauses(&self) -> Vec<String> {
        let quoted = [
            ("domain", &self.domain),
            ("ip", &self.ip),
            ("port", &self.port),
            ("host", &self.host),
            ("body", &self.body),
            ("icon_hash", &self.icon_hash),
            ("icp", &self.icp),
        ];

        let mut out: Vec<String> = quoted
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .collect();

        if !self.status_code.is_empty() {
            out.push(format!("status_code={}", self.status_code));
        }
        out
    }

    /// Returns the AND-joined query expression, or `None` when no clause
    /// is present (an unfiltered search carries no `qbase64` parameter).
    #[must_use]
    pub fn to_expression(&self) -> Option<String> {
        let clauses = self.clauses();
        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join("&&"))
        }
    }
}

/// Query parameters for `GET /api/v1/search/all`.
///
/// The `key` credential parameter is contributed by the client
/// configuration, not here.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    /// Base64-encoded query expression; omitted for unfiltered searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qbase64: Option<String>,
    /// Page size
    pub size: u32,
}

impl From<&AssetFilter> for SearchParams {
    fn from(filter: &AssetFilter) -> Self {
        Self {
            qbase64: filter.to_expression().map(|expr| STANDARD.encode(expr)),
            size: PAGE_SIZE,
        }
    }
}

/// Response from `GET /api/v1/search/all`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Error flag reported by the API (FOFA signals some failures with
    /// HTTP 200 and `error: true`)
    #[serde(default)]
    pub error: bool,
    /// Error message accompanying `error: true`
    #[serde(default)]
    pub errmsg: Option<String>,
    /// Search mode echoed by the API
    #[serde(default)]
    pub mode: Option<String>,
    /// Page number echoed by the API
    #[serde(default)]
    pub page: Option<u64>,
    /// Query expression echoed by the API
    #[serde(default)]
    pub query: Option<String>,
    /// Total result count
    #[serde(default)]
    pub size: Option<u64>,
    /// Result rows. Row arity follows the requested field list, so rows
    /// stay loosely typed at the wire layer.
    #[serde(default)]
    pub results: Option<Vec<Vec<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_emits_status_code_only() {
        let filter = AssetFilter::new();
        assert_eq!(filter.to_expression().as_deref(), Some("status_code=200"));
    }

    #[test]
    fn cleared_filter_emits_no_expression() {
        let filter = AssetFilter::new().with_status_code("");
        assert_eq!(filter.to_expression(), None);
    }

    #[test]
    fn clauses_follow_fixed_order() {
        let filter = AssetFilter::new()
            .with_icp("icp-123")
            .with_domain("example.com")
            .with_port("443")
            .with_body("login");

        // Emission order is fixed regardless of builder call order
        assert_eq!(
            filter.to_expression().as_deref(),
            Some(r#"domain="example.com"&&port="443"&&body="login"&&icp="icp-123"&&status_code=200"#)
        );
    }

    #[test]
    fn all_fields_round_trip_through_base64() {
        let filter = AssetFilter::new()
            .with_domain("example.com")
            .with_ip("1.2.3.4")
            .with_port("8443")
            .with_host("www.example.com")
            .with_body("admin")
            .with_icon_hash("-247388890")
            .with_icp("icp-1")
            .with_status_code("302");

        let expr = filter.to_expression().unwrap();
        assert_eq!(
            expr,
            r#"domain="example.com"&&ip="1.2.3.4"&&port="8443"&&host="www.example.com"&&body="admin"&&icon_hash="-247388890"&&icp="icp-1"&&status_code=302"#
        );

        let params = SearchParams::from(&filter);
        let decoded = STANDARD.decode(params.qbase64.unwrap()).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), expr);
    }

    #[test]
    fn status_code_is_unquoted() {
        let filter = AssetFilter::new().with_status_code("404");
        assert_eq!(filter.to_expression().as_deref(), Some("status_code=404"));
    }

    #[test]
    fn embedded_quotes_pass_through_uninspected() {
        let filter = AssetFilter::new()
            .with_status_code("")
            .with_body(r#"a"b"#);
        assert_eq!(filter.to_expression().as_deref(), Some(r#"body="a"b""#));
    }

    #[test]
    fn params_skip_qbase64_when_unfiltered() {
        let filter = AssetFilter::new().with_status_code("");
        let params = SearchParams::from(&filter);

        let v = serde_json::to_value(&params).unwrap();
        assert!(v.get("qbase64").is_none());
        assert_eq!(v["size"], 1000);
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.error);
        assert!(resp.results.is_none());

        let resp: SearchResponse =
            serde_json::from_str(r#"{"error":true,"errmsg":"invalid key"}"#).unwrap();
        assert!(resp.error);
        assert_eq!(resp.errmsg.as_deref(), Some("invalid key"));
    }
}
