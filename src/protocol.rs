//! Wire types for the four-endpoint tool-call protocol.
//!
//! Every response shape is an explicit struct rather than an ad-hoc JSON
//! map, so the protocol surface is checked by the compiler. Field names on
//! the wire are camelCase (`protocolVersion`, `inputSchema`, `isError`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Protocol version reported by `/initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported by `/initialize`.
pub const SERVER_NAME: &str = "todoist-mcp-server";

/// Static capability descriptor returned by `/initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    pub protocol_version: String,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

/// Advertised capabilities. `tools` is an empty marker object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub tools: ToolsCapability,
}

/// Empty marker — serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsCapability {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl InitializeResponse {
    pub fn current() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: Capabilities {
                tools: ToolsCapability::default(),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Static metadata describing one invocable tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl InputSchema {
    /// Schema for a tool that takes no arguments.
    pub fn empty_object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResponse {
    pub tools: Vec<ToolDescription>,
}

/// Inbound `/tools/call` body. Arguments are accepted but unused by the
/// one supported tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, String>,
}

/// Uniform envelope for tool-call success and failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResponse {
    pub content: Vec<ContentBlock>,
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default = "default_content_type")]
    pub content_type: String,
    pub text: String,
}

fn default_content_type() -> String {
    "text".to_string()
}

impl ToolCallResponse {
    /// Wrap a single text block as a successful response.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock {
                content_type: default_content_type(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// Wrap a single text block as an error response.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_response_shape() {
        let value = serde_json::to_value(InitializeResponse::current()).unwrap();
        assert_eq!(value["protocolVersion"], "2024-11-05");
        assert_eq!(value["capabilities"]["tools"], serde_json::json!({}));
        assert_eq!(value["serverInfo"]["name"], "todoist-mcp-server");
        assert!(value["serverInfo"]["version"].is_string());
    }

    #[test]
    fn test_empty_input_schema_omits_optional_fields() {
        let value = serde_json::to_value(InputSchema::empty_object()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "object"}));
    }

    #[test]
    fn test_tool_description_uses_camel_case() {
        let tool = ToolDescription {
            name: "get_active_tasks".to_string(),
            description: "desc".to_string(),
            input_schema: InputSchema::empty_object(),
        };
        let value = serde_json::to_value(tool).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn test_tool_call_request_defaults_arguments() {
        let request: ToolCallRequest =
            serde_json::from_str(r#"{"name": "get_active_tasks"}"#).unwrap();
        assert_eq!(request.name, "get_active_tasks");
        assert!(request.arguments.is_empty());
    }

    #[test]
    fn test_tool_call_request_with_arguments() {
        let request: ToolCallRequest = serde_json::from_str(
            r#"{"name": "get_active_tasks", "arguments": {"filter": "today"}}"#,
        )
        .unwrap();
        assert_eq!(request.arguments.get("filter").map(String::as_str), Some("today"));
    }

    #[test]
    fn test_tool_call_response_error_envelope() {
        let value = serde_json::to_value(ToolCallResponse::error("Unknown tool: bogus")).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Unknown tool: bogus");
    }

    #[test]
    fn test_tool_call_response_success_envelope() {
        let value = serde_json::to_value(ToolCallResponse::text("ok")).unwrap();
        assert_eq!(value["isError"], false);
        assert_eq!(value["content"][0]["text"], "ok");
    }

    #[test]
    fn test_content_block_type_defaults_on_deserialize() {
        let block: ContentBlock = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(block.content_type, "text");
    }
}
