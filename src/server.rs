//! Tool-call gateway: the four-endpoint HTTP surface.
//!
//! Stateless request/response handlers over a shared [`TodoistClient`].
//! Exactly one tool is exposed (`get_active_tasks`); everything else on
//! `/tools/call` is answered with an error envelope. Tool-call failures are
//! converted to the uniform [`ToolCallResponse`] at the handler boundary
//! and never escalate past the single request.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::protocol::{
    InitializeResponse, InputSchema, ToolCallRequest, ToolCallResponse, ToolDescription,
    ToolsListResponse,
};
use crate::todoist::{Task, TodoistClient};

/// The one supported tool.
pub const ACTIVE_TASKS_TOOL: &str = "get_active_tasks";

const LIVENESS_MESSAGE: &str = "Todoist MCP server is running";
const NO_ACTIVE_TASKS_MESSAGE: &str = "No active tasks found for today or overdue.";

/// Build the gateway router over a shared upstream client.
pub fn router(client: Arc<TodoistClient>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/initialize", post(initialize))
        .route("/tools/list", post(list_tools))
        .route("/tools/call", post(call_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

async fn liveness() -> &'static str {
    info!("Health check request received");
    LIVENESS_MESSAGE
}

/// Capability handshake. The request body is ignored; there is no
/// negotiation, the response is a static descriptor.
async fn initialize() -> Json<InitializeResponse> {
    info!("Initialization request received");
    Json(InitializeResponse::current())
}

async fn list_tools() -> Json<ToolsListResponse> {
    info!("Tools list request received");
    let tool = ToolDescription {
        name: ACTIVE_TASKS_TOOL.to_string(),
        description: "Retrieves all overdue and today's tasks from Todoist".to_string(),
        input_schema: InputSchema::empty_object(),
    };
    Json(ToolsListResponse { tools: vec![tool] })
}

async fn call_tool(
    State(client): State<Arc<TodoistClient>>,
    body: Result<Json<ToolCallRequest>, JsonRejection>,
) -> (StatusCode, Json<ToolCallResponse>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!(error = %rejection, "Malformed tool call request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ToolCallResponse::error(format!(
                    "Invalid request body: {rejection}"
                ))),
            );
        }
    };

    info!(tool = %request.name, arguments = ?request.arguments, "Tool call request received");

    if request.name != ACTIVE_TASKS_TOOL {
        error!(tool = %request.name, "Unknown tool requested");
        return (
            StatusCode::BAD_REQUEST,
            Json(ToolCallResponse::error(format!(
                "Unknown tool: {}",
                request.name
            ))),
        );
    }

    let started = Instant::now();
    match client.get_active_tasks().await {
        Ok(tasks) => {
            info!(
                count = tasks.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Retrieved tasks from Todoist"
            );
            (StatusCode::OK, Json(ToolCallResponse::text(format_tasks(&tasks))))
        }
        Err(e) => {
            error!(error = %e, "Tool call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ToolCallResponse::error(format!("Error: {e}"))),
            )
        }
    }
}

/// Render the filtered task list as human-readable text.
///
/// Each task becomes a numbered block; optional lines (description, due,
/// labels) are emitted only when present, and the due line prefers the
/// human-readable `string` over the raw date.
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_ACTIVE_TASKS_MESSAGE.to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Active Tasks ({}):\n\n", tasks.len()));
    for (index, task) in tasks.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, task.content));
        if !task.description.is_empty() {
            out.push_str(&format!("   Description: {}\n", task.description));
        }
        if let Some(due) = &task.due {
            let display = due.string.as_deref().unwrap_or(&due.date);
            out.push_str(&format!("   Due: {display}\n"));
        }
        out.push_str(&format!("   Priority: {}\n", task.priority));
        if !task.labels.is_empty() {
            out.push_str(&format!("   Labels: {}\n", task.labels.join(", ")));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todoist::Due;

    fn task(content: &str) -> Task {
        Task {
            id: "1".to_string(),
            content: content.to_string(),
            description: String::new(),
            priority: 1,
            due: None,
            project_id: None,
            labels: Vec::new(),
        }
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(
            format_tasks(&[]),
            "No active tasks found for today or overdue."
        );
    }

    #[test]
    fn test_format_minimal_task_block() {
        let mut t = task("Buy milk");
        t.due = Some(Due {
            date: "2024-01-01".to_string(),
            string: None,
            datetime: None,
            timezone: None,
        });
        let rendered = format_tasks(&[t]);
        assert_eq!(
            rendered,
            "Active Tasks (1):\n\n1. Buy milk\n   Due: 2024-01-01\n   Priority: 1\n\n"
        );
    }

    #[test]
    fn test_format_prefers_due_string_over_date() {
        let mut t = task("Buy milk");
        t.due = Some(Due {
            date: "2024-01-01".to_string(),
            string: Some("today".to_string()),
            datetime: None,
            timezone: None,
        });
        let rendered = format_tasks(&[t]);
        assert!(rendered.contains("   Due: today\n"));
        assert!(!rendered.contains("2024-01-01"));
    }

    #[test]
    fn test_format_full_task_block() {
        let mut t = task("Ship release");
        t.description = "tag and publish".to_string();
        t.priority = 4;
        t.due = Some(Due {
            date: "2024-01-01".to_string(),
            string: None,
            datetime: None,
            timezone: None,
        });
        t.labels = vec!["work".to_string(), "urgent".to_string()];
        let rendered = format_tasks(&[t]);
        let expected = concat!(
            "Active Tasks (1):\n\n",
            "1. Ship release\n",
            "   Description: tag and publish\n",
            "   Due: 2024-01-01\n",
            "   Priority: 4\n",
            "   Labels: work, urgent\n\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_format_omits_due_line_without_due_info() {
        let rendered = format_tasks(&[task("Loose end")]);
        assert_eq!(
            rendered,
            "Active Tasks (1):\n\n1. Loose end\n   Priority: 1\n\n"
        );
    }

    #[test]
    fn test_format_numbers_tasks_from_one() {
        let rendered = format_tasks(&[task("first"), task("second")]);
        assert!(rendered.starts_with("Active Tasks (2):\n\n1. first\n"));
        assert!(rendered.contains("\n2. second\n"));
    }
}
