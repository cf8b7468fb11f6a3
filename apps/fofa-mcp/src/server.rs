//! MCP server handler for the asset-search tool and analysis prompt.

use std::sync::Arc;

use asset_search_tools::{
    AssetSearchInput, AssetSearchTools, SearchReply, analysis_prompt, search_assets,
};
use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};

/// Name of the served search tool
pub const TOOL_SEARCH_ASSETS: &str = "search_assets";
/// Name of the served analysis prompt
pub const PROMPT_ASSET_ANALYSIS: &str = "asset_analysis";

const TOOL_DESCRIPTION: &str = "Search the FOFA network-asset engine. Accepts optional filters \
     (domain, ip, port, host, body, icon_hash, icp, status_code) combined with logical AND, and \
     returns the discovered assets as readable text (hostname, address, port per asset).";

const PROMPT_DESCRIPTION: &str =
    "Security-analysis prompt seeded with the query parameters and the formatted asset data.";

/// MCP server handler serving one tool and one prompt.
pub struct AssetSearchServer {
    tools: Arc<AssetSearchTools>,
    name: String,
    version: String,
}

impl AssetSearchServer {
    /// Create a new server around shared tool state.
    pub fn new(tools: Arc<AssetSearchTools>) -> Self {
        Self {
            tools,
            name: "fofa-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Set the server name and version.
    pub fn with_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.version
    }

    fn search_tool() -> m::Tool {
        let input_schema = schemars::schema_for!(AssetSearchInput);
        let schema_json = serde_json::to_value(&input_schema)
            .unwrap_or(serde_json::json!({"type": "object"}));

        let name = TOOL_SEARCH_ASSETS.to_string();
        m::Tool {
            name: name.clone().into(),
            title: name.into(),
            description: Some(TOOL_DESCRIPTION.into()),
            input_schema: Arc::new(schema_json.as_object().cloned().unwrap_or_default()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
        }
    }

    fn analysis_prompt_descriptor() -> m::Prompt {
        m::Prompt::new(
            PROMPT_ASSET_ANALYSIS,
            Some(PROMPT_DESCRIPTION),
            Some(vec![
                m::PromptArgument {
                    name: "query_params".to_string(),
                    title: None,
                    description: Some("Description of the search parameters used".to_string()),
                    required: Some(true),
                },
                m::PromptArgument {
                    name: "assets_data".to_string(),
                    title: None,
                    description: Some("Formatted asset data returned by the search tool".to_string()),
                    required: Some(true),
                },
            ]),
        )
    }
}

/// Projects a [`SearchReply`] to the legacy untagged wire shape: failures
/// are a serialized `{"error": …}` object, success is the bare report.
fn legacy_reply_text(reply: SearchReply) -> String {
    match reply {
        SearchReply::Report(text) => text,
        SearchReply::Failed(msg) => serde_json::json!({ "error": msg }).to_string(),
    }
}

/// Reads one string argument out of a prompt-argument map, defaulting to
/// the empty string when absent.
fn prompt_arg(args: Option<&m::JsonObject>, key: &str) -> String {
    args.and_then(|a| a.get(key))
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Allow manual_async_fn because the trait signature uses `impl Future` return types
#[allow(clippy::manual_async_fn)]
impl ServerHandler for AssetSearchServer {
    fn initialize(
        &self,
        _params: m::InitializeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::InitializeResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::InitializeResult {
                server_info: m::Implementation {
                    name: self.name.clone(),
                    title: self.name.clone().into(),
                    version: self.version.clone(),
                    website_url: None,
                    icons: None,
                },
                capabilities: m::ServerCapabilities::builder()
                    .enable_tools()
                    .enable_prompts()
                    .build(),
                ..Default::default()
            })
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: vec![Self::search_tool()],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move {
            if req.name != TOOL_SEARCH_ASSETS {
                return Ok(m::CallToolResult::error(vec![m::Content::text(format!(
                    "Tool '{}' not served by this server",
                    req.name
                ))]));
            }

            let args = serde_json::Value::Object(req.arguments.unwrap_or_default());
            let input: AssetSearchInput = match serde_json::from_value(args) {
                Ok(input) => input,
                Err(e) => {
                    return Ok(m::CallToolResult::error(vec![m::Content::text(format!(
                        "invalid input: {e}"
                    ))]));
                }
            };

            match search_assets(&self.tools, input).await {
                Ok(reply) => Ok(m::CallToolResult {
                    content: vec![m::Content::text(legacy_reply_text(reply))],
                    structured_content: None,
                    is_error: Some(false),
                    meta: None,
                }),
                // Structural fault in upstream data: the one hard failure
                Err(e) => Ok(m::CallToolResult::error(vec![m::Content::text(
                    e.to_string(),
                )])),
            }
        }
    }

    fn list_prompts(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListPromptsResult, m::ErrorData>> + Send + '_
    {
        async {
            Ok(m::ListPromptsResult {
                prompts: vec![Self::analysis_prompt_descriptor()],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn get_prompt(
        &self,
        req: m::GetPromptRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::GetPromptResult, m::ErrorData>> + Send + '_
    {
        async move {
            if req.name != PROMPT_ASSET_ANALYSIS {
                return Err(m::ErrorData::invalid_params(
                    format!("Prompt '{}' not served by this server", req.name),
                    None,
                ));
            }

            let query_params = prompt_arg(req.arguments.as_ref(), "query_params");
            let assets_data = prompt_arg(req.arguments.as_ref(), "assets_data");

            Ok(m::GetPromptResult {
                description: Some(PROMPT_DESCRIPTION.to_string()),
                messages: vec![m::PromptMessage::new_text(
                    m::PromptMessageRole::User,
                    analysis_prompt(&query_params, &assets_data),
                )],
            })
        }
    }

    fn ping(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }

    fn complete(
        &self,
        _req: m::CompleteRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CompleteResult, m::ErrorData>> + Send + '_
    {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }

    fn set_level(
        &self,
        _req: m::SetLevelRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }

    fn list_resources(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourcesResult, m::ErrorData>> + Send + '_
    {
        async {
            Ok(m::ListResourcesResult {
                resources: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn list_resource_templates(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourceTemplatesResult, m::ErrorData>>
    + Send
    + '_ {
        async {
            Ok(m::ListResourceTemplatesResult {
                resource_templates: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        _req: m::ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ReadResourceResult, m::ErrorData>> + Send + '_
    {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }

    fn subscribe(
        &self,
        _req: m::SubscribeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }

    fn unsubscribe(
        &self,
        _req: m::UnsubscribeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async {
            Err(m::ErrorData::invalid_request(
                "Method not implemented",
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_info_defaults_and_overrides() {
        let tools = Arc::new(AssetSearchTools::with_config(
            fofa_async::FofaConfig::new().with_api_key("k"),
        ));

        let server = AssetSearchServer::new(tools.clone());
        assert_eq!(server.name(), "fofa-mcp");

        let server = AssetSearchServer::new(tools).with_info("my-server", "9.9.9");
        assert_eq!(server.name(), "my-server");
        assert_eq!(server.version(), "9.9.9");
    }

    #[test]
    fn tool_schema_lists_all_filter_fields() {
        let tool = AssetSearchServer::search_tool();
        assert_eq!(tool.name.as_ref(), TOOL_SEARCH_ASSETS);

        let schema = serde_json::to_value(tool.input_schema.as_ref()).unwrap();
        for field in [
            "domain",
            "ip",
            "port",
            "host",
            "body",
            "icon_hash",
            "icp",
            "status_code",
        ] {
            assert!(
                schema["properties"][field].is_object(),
                "missing schema property {field}"
            );
        }
    }

    #[test]
    fn failed_reply_projects_to_error_object() {
        let text = legacy_reply_text(SearchReply::Failed("request failed or no response"));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["error"], "request failed or no response");
    }

    #[test]
    fn report_reply_projects_to_bare_text() {
        let text = legacy_reply_text(SearchReply::Report(
            "Host: a.com\nAddress: 1.2.3.4\nPort: 443\n".into(),
        ));
        // Bare string, not wrapped in a success envelope
        assert_eq!(text, "Host: a.com\nAddress: 1.2.3.4\nPort: 443\n");
    }

    #[test]
    fn prompt_descriptor_declares_two_required_arguments() {
        let prompt = AssetSearchServer::analysis_prompt_descriptor();
        assert_eq!(prompt.name, PROMPT_ASSET_ANALYSIS);

        let args = prompt.arguments.unwrap();
        assert_eq!(args.len(), 2);
        assert!(args.iter().all(|a| a.required == Some(true)));
    }

    #[test]
    fn prompt_arg_defaults_to_empty() {
        let mut map = m::JsonObject::new();
        map.insert("query_params".into(), "domain=example.com".into());

        assert_eq!(prompt_arg(Some(&map), "query_params"), "domain=example.com");
        assert_eq!(prompt_arg(Some(&map), "assets_data"), "");
        assert_eq!(prompt_arg(None, "query_params"), "");
    }
}
