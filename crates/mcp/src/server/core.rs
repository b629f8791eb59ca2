use std::sync::Arc;

use comicvine_api::ComicVineApi;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData, Implementation, ListToolsResult, PaginatedRequestParams,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool, ToolAnnotations,
};
use rmcp::{RoleServer, ServerHandler, service::RequestContext};
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::SERVER_INSTRUCTIONS;
use crate::registry::{ToolDefinition, ToolOutput, ToolRegistry};
use crate::server::errors::tool_error;

/// MCP handler over a shared [`ToolRegistry`].
pub struct ComicsMcpCore<A> {
    registry: Arc<ToolRegistry<A>>,
}

impl<A> Clone for ComicsMcpCore<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<A: ComicVineApi + 'static> ComicsMcpCore<A> {
    pub fn new(registry: ToolRegistry<A>) -> Self {
        Self::shared(Arc::new(registry))
    }

    pub fn shared(registry: Arc<ToolRegistry<A>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry<A> {
        &self.registry
    }

    /// The catalogue as MCP tool descriptors.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.tools().map(to_mcp_tool).collect()
    }

    /// Runs one tool and shapes its result for the wire.
    ///
    /// Envelopes are returned as structured content. The HTML digest is two
    /// text items: the page, then a JSON summary.
    pub async fn dispatch(&self, name: &str, arguments: Option<Map<String, Value>>) -> Result<CallToolResult, ErrorData> {
        match self.registry.call(name, arguments).await {
            Ok(ToolOutput::Json(value)) => Ok(CallToolResult::structured(value)),
            Ok(ToolOutput::Html(digest)) => {
                let summary = json!({
                    "count": digest.count,
                    "total": digest.total,
                    "message": digest.message,
                });
                Ok(CallToolResult::success(vec![
                    Content::text(digest.html),
                    Content::text(summary.to_string()),
                ]))
            }
            Err(error) => {
                warn!(
                    tool = name,
                    error_code = error.error_code(),
                    error = %error,
                    "tool call failed"
                );
                Err(tool_error(name, &error))
            }
        }
    }
}

fn to_mcp_tool(definition: &ToolDefinition) -> Tool {
    let mut tool = Tool::new(
        definition.name.clone(),
        definition.description.clone(),
        Arc::new(definition.input.schema()),
    );
    tool.title = Some(definition.title.clone());
    tool.output_schema = definition.output_schema.clone();
    tool.annotations = Some(ToolAnnotations::new().read_only(true).open_world(true));
    tool
}

impl<A: ComicVineApi + 'static> ServerHandler for ComicsMcpCore<A> {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools(),
            meta: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move { self.dispatch(&request.name, request.arguments).await }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "comicvine-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Comic Vine MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicvine_api::ApiError;
    use comicvine_api::testing::ScriptedApi;
    use rmcp::model::ErrorCode;

    fn core(api: ScriptedApi) -> ComicsMcpCore<ScriptedApi> {
        ComicsMcpCore::new(ToolRegistry::new(api))
    }

    fn arguments(value: Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    #[test]
    fn advertises_tools_with_schemas() {
        let tools = core(ScriptedApi::new()).tools();
        let search = tools.iter().find(|tool| tool.name == "search").unwrap();
        assert_eq!(search.input_schema.get("required"), Some(&json!(["query"])));
        assert!(search.output_schema.is_some());
        assert_eq!(search.title.as_deref(), Some("Search"));
    }

    #[test]
    fn server_info_names_the_server_and_enables_tools() {
        let info = core(ScriptedApi::new()).get_info();
        assert_eq!(info.server_info.name, "comicvine-mcp");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("character,issue"));
    }

    #[tokio::test]
    async fn json_results_are_structured() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 1, "name": null }] }));
        let result = core(api)
            .dispatch("search", arguments(json!({ "query": "Robin" })))
            .await
            .unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["structuredContent"]["results"][0]["name"], json!(""));
        assert_eq!(value["structuredContent"]["number_of_total_results"], json!(1));
    }

    #[tokio::test]
    async fn html_digest_is_page_then_summary() {
        let api = ScriptedApi::new().respond(json!({ "number_of_total_results": 9, "results": [{ "id": 1, "name": "Robin" }] }));
        let result = core(api).dispatch("generate_comics_html", None).await.unwrap();

        let value = serde_json::to_value(&result).unwrap();
        let page = value["content"][0]["text"].as_str().unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        let summary: Value = serde_json::from_str(value["content"][1]["text"].as_str().unwrap()).unwrap();
        assert_eq!(summary, json!({ "count": 1, "total": 9, "message": "Generated HTML page with 1 of 9 issues" }));
    }

    #[tokio::test]
    async fn failures_become_structured_errors() {
        let api = ScriptedApi::new().fail(ApiError::configuration("missing COMIC_VINE_API_KEY"));
        let error = core(api).dispatch("get_issues", None).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(error.data.unwrap()["error_code"], json!("CONFIGURATION_ERROR"));
    }
}
