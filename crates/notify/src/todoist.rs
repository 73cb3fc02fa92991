//! Todoist REST client for appointment mirroring.
//!
//! Appointments are mirrored as Todoist tasks (create/update/delete pushed
//! from the API handlers, due-date changes pulled back by the sync
//! scheduler in [`crate::sync`]). All calls are best-effort: callers log
//! failures and carry on, the appointment row is the source of record.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

/// Timeout for a single Todoist API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const API_BASE: &str = "https://api.todoist.com/rest/v2";

/// Error from a Todoist API call.
#[derive(Debug, thiserror::Error)]
pub enum TodoistError {
    /// The HTTP request itself failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Todoist rejected the call.
    #[error("Todoist returned HTTP {0}")]
    HttpStatus(u16),
}

/// Todoist credentials and optional target project.
#[derive(Debug, Clone)]
pub struct TodoistConfig {
    pub api_token: String,
    /// Project tasks are filed under; `None` means the inbox.
    pub project_id: Option<String>,
}

impl TodoistConfig {
    /// Load Todoist configuration from the environment.
    ///
    /// Returns `None` (integration disabled) when `TODOIST_API_TOKEN` is
    /// unset.
    pub fn from_env() -> Option<Self> {
        let api_token = std::env::var("TODOIST_API_TOKEN").ok()?;
        let project_id = std::env::var("TODOIST_PROJECT_ID").ok();
        Some(Self {
            api_token,
            project_id,
        })
    }
}

/// A task as returned by the Todoist REST API (fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct TodoistTask {
    pub id: String,
    pub content: String,
    pub due: Option<TodoistDue>,
}

/// Due-date block of a Todoist task.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoistDue {
    /// `YYYY-MM-DD`.
    pub date: String,
}

impl TodoistTask {
    /// The task's due date, if present and well-formed.
    pub fn due_date(&self) -> Option<NaiveDate> {
        let due = self.due.as_ref()?;
        NaiveDate::parse_from_str(&due.date, "%Y-%m-%d").ok()
    }
}

/// Thin client over the Todoist REST API.
pub struct TodoistClient {
    client: reqwest::Client,
    config: TodoistConfig,
}

impl TodoistClient {
    /// Create a client with a pre-configured HTTP client.
    pub fn new(config: TodoistConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Create a task for an appointment, returning the new task's id.
    pub async fn create_task(
        &self,
        content: &str,
        due_date: NaiveDate,
        description: &str,
    ) -> Result<String, TodoistError> {
        let mut payload = json!({
            "content": content,
            "description": description,
            "due_date": due_date.format("%Y-%m-%d").to_string(),
        });
        if let Some(project_id) = &self.config.project_id {
            payload["project_id"] = json!(project_id);
        }

        let response = self
            .client
            .post(format!("{API_BASE}/tasks"))
            .bearer_auth(&self.config.api_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TodoistError::HttpStatus(response.status().as_u16()));
        }

        let task: TodoistTask = response.json().await?;
        tracing::info!(task_id = %task.id, "Created Todoist task");
        Ok(task.id)
    }

    /// Update a task's content and/or due date.
    pub async fn update_task(
        &self,
        task_id: &str,
        content: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<(), TodoistError> {
        let mut payload = serde_json::Map::new();
        if let Some(content) = content {
            payload.insert("content".into(), json!(content));
        }
        if let Some(date) = due_date {
            payload.insert("due_date".into(), json!(date.format("%Y-%m-%d").to_string()));
        }
        if payload.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .post(format!("{API_BASE}/tasks/{task_id}"))
            .bearer_auth(&self.config.api_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TodoistError::HttpStatus(response.status().as_u16()));
        }
        tracing::info!(task_id, "Updated Todoist task");
        Ok(())
    }

    /// Delete a task.
    pub async fn delete_task(&self, task_id: &str) -> Result<(), TodoistError> {
        let response = self
            .client
            .delete(format!("{API_BASE}/tasks/{task_id}"))
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TodoistError::HttpStatus(response.status().as_u16()));
        }
        tracing::info!(task_id, "Deleted Todoist task");
        Ok(())
    }

    /// List active tasks (scoped to the configured project when set).
    pub async fn list_tasks(&self) -> Result<Vec<TodoistTask>, TodoistError> {
        let mut request = self
            .client
            .get(format!("{API_BASE}/tasks"))
            .bearer_auth(&self.config.api_token);
        if let Some(project_id) = &self.config.project_id {
            request = request.query(&[("project_id", project_id)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TodoistError::HttpStatus(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}
