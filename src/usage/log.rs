// src/usage/log.rs
use crate::auth::token::generate_event_id;
use crate::usage::{NewUsageEvent, UsageError, UsageEvent, UsageFilter};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Append-only JSON-lines log of tool usage events.
///
/// Cheap to clone: clones share the path and the append lock, so lines
/// written from different server workers never interleave.
#[derive(Clone)]
pub struct UsageLog {
    path: PathBuf,
    append_lock: Arc<Mutex<()>>,
}

impl UsageLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamps `new` with a fresh id and the current time, then appends it.
    pub fn record(
        &self,
        new: NewUsageEvent,
        user_agent: Option<String>,
    ) -> Result<UsageEvent, UsageError> {
        let event = UsageEvent::build(new, generate_event_id(), Utc::now(), user_agent)?;
        self.append(&event)?;
        Ok(event)
    }

    pub fn append(&self, event: &UsageEvent) -> Result<(), UsageError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }

    /// Matching events, newest first, at most `filter.limit` of them.
    pub fn query(&self, filter: &UsageFilter) -> Result<Vec<UsageEvent>, UsageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut events: Vec<UsageEvent> = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(n, line)| match serde_json::from_str::<UsageEvent>(line) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(line = n + 1, error = %e, "skipping unreadable usage log line");
                    None
                }
            })
            .filter(|event| filter.matches(event))
            .collect();

        // Stable sort keeps file order for equal timestamps; reverse puts the
        // latest append first.
        events.sort_by_key(|e| e.timestamp);
        events.reverse();
        events.truncate(filter.limit);

        Ok(events)
    }
}
