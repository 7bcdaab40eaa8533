use crate::comps::{CompsError, ListingsClient};
use crate::config::Config;
use crate::usage::UsageLog;

/// Everything a request handler needs, shared by all server workers.
pub struct AppState {
    pub listings: ListingsClient,
    pub usage: UsageLog,
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, CompsError> {
        Ok(Self {
            listings: ListingsClient::new(&config.listings)?,
            usage: UsageLog::new(config.usage_log_path.clone()),
            admin_key: config.admin_key.clone(),
        })
    }
}
