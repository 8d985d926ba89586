//! Adapter for Atlassian Statuspage-hosted services (github, trello,
//! cloudflare, ...). These pages all expose `api/v2/status.json` under the
//! page root, so the endpoint can be derived when the catalog does not pin
//! one.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{collapse_duplicate_slashes, StatusAdapter};
use crate::catalog::ServiceRecord;
use crate::error::{Result, VigilError};
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::Transport;

const VENDOR: &str = "atlassian";

#[derive(Debug, Deserialize)]
struct StatusPayload {
    status: StatusBody,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    indicator: String,
    #[serde(default)]
    description: String,
}

pub struct AtlassianAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl AtlassianAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn derived_url(&self) -> String {
        collapse_duplicate_slashes(&format!("{}/api/v2/status.json", self.record.web))
    }

    fn parse(&self, value: serde_json::Value) -> Result<ServiceStatus> {
        let payload: StatusPayload =
            serde_json::from_value(value).map_err(|e| VigilError::Parse {
                vendor: VENDOR,
                reason: e.to_string(),
            })?;

        // Anything that is not explicitly "none" counts as a partial
        // outage, including "critical". Statuspage indicators are free-form
        // enough that guessing a worse level from them is not safe.
        let level = match payload.status.indicator.as_str() {
            "none" => StatusLevel::Operational,
            _ => StatusLevel::PartialOutage,
        };

        Ok(ServiceStatus::new(&self.record.name, level)
            .with_description(payload.status.description))
    }
}

#[async_trait]
impl StatusAdapter for AtlassianAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn status_url(&self) -> Option<String> {
        self.record
            .urls
            .status
            .clone()
            .or_else(|| Some(self.derived_url()))
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = self
            .record
            .urls
            .status
            .clone()
            .unwrap_or_else(|| self.derived_url());
        debug!(service = %self.record.name, url = %url, "checking statuspage");

        let value = self.transport.fetch_json(&url).await?;
        self.parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter(record: ServiceRecord) -> AtlassianAdapter {
        AtlassianAdapter::new(record, Transport::new())
    }

    fn github() -> AtlassianAdapter {
        adapter(ServiceRecord::new(
            "github",
            "atlassian",
            "https://www.githubstatus.com/",
        ))
    }

    #[test]
    fn test_indicator_none_is_operational() {
        let status = github()
            .parse(json!({"status": {"indicator": "none", "description": "All Systems Operational"}}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::Operational);
        assert_eq!(status.description.as_deref(), Some("All Systems Operational"));
    }

    #[test]
    fn test_indicator_minor_is_partial_outage() {
        let status = github()
            .parse(json!({"status": {"indicator": "minor", "description": "Incident with API"}}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::PartialOutage);
        assert_eq!(status.description.as_deref(), Some("Incident with API"));
    }

    #[test]
    fn test_unrecognized_indicator_stays_partial_outage() {
        let status = github()
            .parse(json!({"status": {"indicator": "critical", "description": ""}}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::PartialOutage);
        assert!(status.description.is_none());
    }

    #[test]
    fn test_missing_status_field_is_a_parse_error() {
        match github().parse(json!({"page": {}})) {
            Err(VigilError::Parse { vendor, .. }) => assert_eq!(vendor, "atlassian"),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_url_is_derived_from_web_url() {
        assert_eq!(
            github().status_url().unwrap(),
            "https://www.githubstatus.com/api/v2/status.json"
        );
    }

    #[test]
    fn test_status_url_collapses_duplicate_slashes() {
        let a = adapter(ServiceRecord::new(
            "example",
            "atlassian",
            "https://example.com//",
        ));
        assert_eq!(
            a.status_url().unwrap(),
            "https://example.com/api/v2/status.json"
        );
    }

    #[test]
    fn test_explicit_status_url_wins() {
        let a = adapter(
            ServiceRecord::new("example", "atlassian", "https://example.com/")
                .with_status_url("https://example.com/custom/status.json"),
        );
        assert_eq!(
            a.status_url().unwrap(),
            "https://example.com/custom/status.json"
        );
    }

    #[test]
    fn test_status_url_is_idempotent() {
        let a = github();
        assert_eq!(a.status_url(), a.status_url());
    }
}
