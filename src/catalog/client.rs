use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::CatalogError;
use super::types::{CatalogEntry, SatcatRecord, SearchOutcome};
use crate::web::config::CatalogConfig;

const BODY_EXCERPT_LEN: usize = 200;

/// Source of satellite catalog data.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Free-text name search returning at most `limit` entries.
    async fn search(&self, query: &str, limit: usize) -> SearchOutcome;

    /// Raw element-set text for a catalog number (two or three lines).
    async fn fetch_elements(&self, norad_id: u32) -> Result<String, CatalogError>;
}

/// CelesTrak SATCAT search and GP element fetch.
pub struct CelestrakClient {
    http: Client,
    base_url: String,
    search_timeout: Duration,
    fetch_timeout: Duration,
}

impl CelestrakClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
        }
    }
}

#[async_trait]
impl Catalog for CelestrakClient {
    async fn search(&self, query: &str, limit: usize) -> SearchOutcome {
        let url = format!("{}/satcat/records.php", self.base_url);
        log::debug!("searching catalog for '{}'", query);

        let response = match self
            .http
            .get(&url)
            .query(&[("NAME", query), ("FORMAT", "json")])
            .timeout(self.search_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SearchOutcome::Unreachable(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return SearchOutcome::Unreachable(format!("HTTP status {}", status));
        }

        match response.text().await {
            Ok(text) => parse_search_response(&text, limit),
            Err(e) => SearchOutcome::Unreachable(e.to_string()),
        }
    }

    async fn fetch_elements(&self, norad_id: u32) -> Result<String, CatalogError> {
        let url = format!("{}/NORAD/elements/gp.php", self.base_url);
        log::debug!("fetching elements for NORAD ID {}", norad_id);

        let transport = |e: reqwest::Error| CatalogError::Transport {
            norad_id,
            message: if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            },
        };

        let response = self
            .http
            .get(&url)
            .query(&[("CATNR", norad_id)])
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(CatalogError::Http {
                norad_id,
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        Ok(body)
    }
}

/// Normalizes a SATCAT JSON response. `limit` applies to the raw records,
/// before records without a catalog number are dropped.
pub fn parse_search_response(text: &str, limit: usize) -> SearchOutcome {
    let text = text.trim();
    if text.is_empty() {
        return SearchOutcome::Found(Vec::new());
    }

    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return SearchOutcome::Malformed(format!("{}: {}", e, excerpt(text))),
    };

    let serde_json::Value::Array(records) = value else {
        return SearchOutcome::Malformed("expected a JSON array of records".to_string());
    };

    let entries: Vec<CatalogEntry> = records
        .into_iter()
        .take(limit)
        .filter_map(|raw| match serde_json::from_value::<SatcatRecord>(raw) {
            Ok(record) => record.into_entry(),
            Err(e) => {
                log::debug!("skipping unreadable catalog record: {}", e);
                None
            }
        })
        .collect();

    SearchOutcome::Found(entries)
}

pub(crate) fn excerpt(text: &str) -> String {
    text.chars().take(BODY_EXCERPT_LEN).collect()
}
