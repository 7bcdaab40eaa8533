// src/comps/client.rs
use crate::comps::extract::extract_comps;
use crate::comps::stats::{summarize, trim_outliers, CompsSummary};
use crate::comps::{CompsError, QueryCriteria, SearchBounds};
use crate::config::ListingsApiConfig;
use reqwest::blocking::Client;
use serde_json::Value;

const USER_AGENT: &str = concat!("rentcomps/", env!("CARGO_PKG_VERSION"));
const SEARCH_PATH: &str = "/properties/v2/list-for-rent";

/// Client for the third-party rental listings search.
pub struct ListingsClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: Option<String>,
}

impl ListingsClient {
    pub fn new(config: &ListingsApiConfig) -> Result<Self, CompsError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompsError::Unexpected(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fails when no API key was configured. Checked before the request
    /// body is even looked at.
    pub fn ensure_configured(&self) -> Result<&str, CompsError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| CompsError::Config("RAPIDAPI_KEY is not set".into()))
    }

    /// Fetch, extract, trim and summarize comps for `criteria`.
    pub fn estimate(&self, criteria: &QueryCriteria) -> Result<CompsSummary, CompsError> {
        let bounds = SearchBounds::from_criteria(criteria);
        let payload = self.search(&bounds)?;

        let comps = extract_comps(&payload);
        let extracted = comps.len();
        let comps = trim_outliers(comps);

        tracing::debug!(
            zip = %criteria.zip,
            extracted,
            kept = comps.len(),
            "comps filtered"
        );

        Ok(summarize(&criteria.zip, &comps))
    }

    /// One search against the listings API. Not retried.
    pub fn search(&self, bounds: &SearchBounds) -> Result<Value, CompsError> {
        let api_key = self.ensure_configured()?;
        let url = format!("{}{SEARCH_PATH}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&bounds.query_pairs())
            .send()
            .map_err(|e| CompsError::Unexpected(format!("listings request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| CompsError::Unexpected(format!("reading listings response failed: {e}")))?;

        if !status.is_success() {
            return Err(CompsError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| CompsError::Unexpected(format!("listings response is not JSON: {e}")))
    }
}
