use crate::usage::{UsageError, UsageEvent};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_LIMIT: usize = 1000;

/// Filters for the admin listing. Every set field must match.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageFilter {
    pub tool: Option<String>,
    pub event: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl Default for UsageFilter {
    fn default() -> Self {
        Self {
            tool: None,
            event: None,
            since: None,
            until: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl UsageFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, UsageError> {
        let get = |k: &str| {
            params
                .get(k)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let limit = match get("limit") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| UsageError::Invalid(format!("limit must be a number, got {v:?}")))?
                .clamp(1, MAX_LIMIT),
            None => DEFAULT_LIMIT,
        };

        Ok(Self {
            tool: get("tool").map(str::to_string),
            event: get("event").map(str::to_string),
            since: get("since").map(|v| timestamp(v, "since")).transpose()?,
            until: get("until").map(|v| timestamp(v, "until")).transpose()?,
            limit,
        })
    }

    pub fn matches(&self, event: &UsageEvent) -> bool {
        if let Some(tool) = &self.tool {
            if !event.tool.eq_ignore_ascii_case(tool) {
                return false;
            }
        }
        if let Some(name) = &self.event {
            if event.event != *name {
                return false;
            }
        }
        if self.since.is_some_and(|since| event.timestamp < since) {
            return false;
        }
        if self.until.is_some_and(|until| event.timestamp > until) {
            return false;
        }
        true
    }
}

fn timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, UsageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| UsageError::Invalid(format!("{field} must be an RFC 3339 timestamp")))
}
