// src/usage/event.rs
use crate::usage::UsageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_TOOL_LEN: usize = 100;
pub const DEFAULT_EVENT: &str = "use";

/// Body of a tracking request, as sent by the site.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUsageEvent {
    pub tool: String,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub page: Option<String>,
}

impl NewUsageEvent {
    pub fn from_json_body(body: &str) -> Result<Self, UsageError> {
        serde_json::from_str(body)
            .map_err(|e| UsageError::Invalid(format!("invalid tracking body: {e}")))
    }
}

/// One line of the usage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub tool: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl UsageEvent {
    /// Validates `new` and stamps it with `id` and `timestamp`.
    pub fn build(
        new: NewUsageEvent,
        id: String,
        timestamp: DateTime<Utc>,
        user_agent: Option<String>,
    ) -> Result<Self, UsageError> {
        let tool = new.tool.trim().to_string();
        if tool.is_empty() {
            return Err(UsageError::Invalid("tool is required".into()));
        }
        if tool.chars().count() > MAX_TOOL_LEN {
            return Err(UsageError::Invalid(format!(
                "tool must be at most {MAX_TOOL_LEN} characters"
            )));
        }

        let event = new
            .event
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT.to_string());

        Ok(Self {
            id,
            timestamp,
            tool,
            event,
            data: new.data.filter(|d| !d.is_null()),
            page: new.page.filter(|p| !p.trim().is_empty()),
            user_agent: user_agent.filter(|ua| !ua.is_empty()),
        })
    }
}
