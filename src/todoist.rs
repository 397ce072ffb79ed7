//! Upstream Todoist client.
//!
//! Fetches the caller's active task list from the Todoist REST v2 API and
//! filters it to tasks due today or earlier. The client carries no
//! cross-call state beyond the reusable connection pool and the bearer
//! token; every fetch is a single GET with no retry.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::config::TodoistConfig;
use crate::error::{ServiceError, ServiceResult};

/// Request timeout for upstream calls. The Todoist API has no streaming
/// endpoints, so a flat bound is enough.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A task as returned by the Todoist REST v2 API. Unknown upstream fields
/// are ignored; absent optional fields fall back to serde defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Due-date structure attached to a task. Only `date` is guaranteed;
/// `string` is the human-readable form preferred for display.
#[derive(Debug, Clone, Deserialize)]
pub struct Due {
    pub date: String,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_priority() -> i64 {
    1
}

/// Read-only client for the Todoist REST API, shared across requests.
#[derive(Debug, Clone)]
pub struct TodoistClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    /// Build a client from validated configuration.
    pub fn new(config: &TodoistConfig) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Fetch the caller's tasks and keep those due today or earlier.
    ///
    /// Upstream order is preserved; tasks with no due date are excluded.
    /// Network failures, non-2xx responses, and malformed payloads all
    /// surface as errors with no retry.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_active_tasks(&self) -> ServiceResult<Vec<Task>> {
        let url = format!("{}/tasks", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Todoist API returned an error");
            return Err(ServiceError::api_error(status.as_u16(), body));
        }

        let all_tasks: Vec<Task> = response.json().await?;
        let today = Utc::now().date_naive();

        let active = filter_active(all_tasks, today)?;
        tracing::debug!(count = active.len(), "Filtered active tasks");
        Ok(active)
    }
}

/// Keep tasks whose due date is on or before `today`, preserving order.
///
/// A due date that fails to parse is a hard error rather than a silent
/// skip; it means the upstream contract changed underneath us.
pub fn filter_active(tasks: Vec<Task>, today: NaiveDate) -> ServiceResult<Vec<Task>> {
    let mut active = Vec::new();
    for task in tasks {
        let Some(due) = task.due.as_ref() else {
            continue;
        };
        let due_date = NaiveDate::parse_from_str(&due.date, DUE_DATE_FORMAT).map_err(|_| {
            ServiceError::InvalidDueDate {
                task_id: task.id.clone(),
                value: due.date.clone(),
            }
        })?;
        if due_date <= today {
            active.push(task);
        }
    }
    Ok(active)
}
