//! Adapters for status.io-backed pages. Two shapes exist in the wild: the
//! JSON API (`result.status_overall.status`) and the public HTML page,
//! which only admits substring matching.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{required_status_url, StatusAdapter};
use crate::catalog::ServiceRecord;
use crate::error::{Result, VigilError};
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::Transport;

const VENDOR: &str = "status.io";
const ALL_SYSTEMS_OPERATIONAL: &str = "All Systems Operational";

#[derive(Debug, Deserialize)]
struct OverallPayload {
    result: OverallResult,
}

#[derive(Debug, Deserialize)]
struct OverallResult {
    status_overall: OverallStatus,
}

#[derive(Debug, Deserialize)]
struct OverallStatus {
    status: String,
}

pub struct StatusIoAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl StatusIoAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn parse(&self, value: serde_json::Value) -> Result<ServiceStatus> {
        let payload: OverallPayload =
            serde_json::from_value(value).map_err(|e| VigilError::Parse {
                vendor: VENDOR,
                reason: e.to_string(),
            })?;

        let level = if payload.result.status_overall.status == "Operational" {
            StatusLevel::Operational
        } else {
            StatusLevel::PartialOutage
        };

        Ok(ServiceStatus::new(&self.record.name, level))
    }
}

#[async_trait]
impl StatusAdapter for StatusIoAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = required_status_url(&self.record)?;
        debug!(service = %self.record.name, url = %url, "checking overall status");

        let value = self.transport.fetch_json(&url).await?;
        self.parse(value)
    }
}

/// Fallback for status.io pages whose JSON API is not exposed: scrape the
/// public page for the banner text.
pub struct StatusIoHtmlAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl StatusIoHtmlAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn derive(&self, body: &str) -> ServiceStatus {
        let level = if body.contains(ALL_SYSTEMS_OPERATIONAL) {
            StatusLevel::Operational
        } else {
            StatusLevel::PartialOutage
        };

        ServiceStatus::new(&self.record.name, level)
    }
}

#[async_trait]
impl StatusAdapter for StatusIoHtmlAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn status_url(&self) -> Option<String> {
        // The banner lives on the page root when no endpoint is pinned.
        self.record
            .urls
            .status
            .clone()
            .or_else(|| Some(self.record.web.clone()))
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = self
            .record
            .urls
            .status
            .clone()
            .unwrap_or_else(|| self.record.web.clone());
        debug!(service = %self.record.name, url = %url, "scraping status page");

        let body = self.transport.fetch_text(&url).await?;
        Ok(self.derive(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_adapter() -> StatusIoAdapter {
        StatusIoAdapter::new(
            ServiceRecord::new("planetscale", "status.io", "https://www.planetscalestatus.com/")
                .with_status_url("https://api.status.io/1.0/status/abc123"),
            Transport::new(),
        )
    }

    fn html_adapter() -> StatusIoHtmlAdapter {
        StatusIoHtmlAdapter::new(
            ServiceRecord::new("docker", "status.io-html", "https://status.docker.com/"),
            Transport::new(),
        )
    }

    #[test]
    fn test_overall_operational_is_operational() {
        let status = json_adapter()
            .parse(json!({"result": {"status_overall": {"status": "Operational"}}}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::Operational);
    }

    #[test]
    fn test_overall_anything_else_is_partial_outage() {
        let status = json_adapter()
            .parse(json!({"result": {"status_overall": {"status": "Degraded Performance"}}}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::PartialOutage);
    }

    #[test]
    fn test_missing_result_field_is_a_parse_error() {
        match json_adapter().parse(json!({"status": "Operational"})) {
            Err(VigilError::Parse { vendor, .. }) => assert_eq!(vendor, "status.io"),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_banner_text_is_operational() {
        let body = "<html><body><h1>All Systems Operational</h1></body></html>";
        assert_eq!(html_adapter().derive(body).level, StatusLevel::Operational);
    }

    #[test]
    fn test_missing_banner_is_partial_outage() {
        let body = "<html><body><h1>Partial System Outage</h1></body></html>";
        assert_eq!(html_adapter().derive(body).level, StatusLevel::PartialOutage);
    }

    #[test]
    fn test_html_url_falls_back_to_page_root() {
        assert_eq!(
            html_adapter().status_url().unwrap(),
            "https://status.docker.com/"
        );
    }
}
