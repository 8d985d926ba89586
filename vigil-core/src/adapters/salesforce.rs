//! Adapter for the Salesforce trust status API. The endpoint reports one
//! entry per instance; the service is healthy only when every instance is
//! green.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{required_status_url, StatusAdapter};
use crate::catalog::ServiceRecord;
use crate::error::{Result, VigilError};
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::Transport;

const VENDOR: &str = "salesforce";

#[derive(Debug, Deserialize)]
struct InstancesPayload {
    data: Vec<Instance>,
}

#[derive(Debug, Deserialize)]
struct Instance {
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    color: String,
}

pub struct SalesforceAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl SalesforceAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn parse(&self, value: serde_json::Value) -> Result<ServiceStatus> {
        let payload: InstancesPayload =
            serde_json::from_value(value).map_err(|e| VigilError::Parse {
                vendor: VENDOR,
                reason: e.to_string(),
            })?;

        let level = if payload.data.iter().all(|i| i.attributes.color == "green") {
            StatusLevel::Operational
        } else {
            StatusLevel::PartialOutage
        };

        Ok(ServiceStatus::new(&self.record.name, level))
    }
}

#[async_trait]
impl StatusAdapter for SalesforceAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = required_status_url(&self.record)?;
        debug!(service = %self.record.name, url = %url, "checking instance colors");

        let value = self.transport.fetch_json(&url).await?;
        self.parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter() -> SalesforceAdapter {
        SalesforceAdapter::new(
            ServiceRecord::new("salesforce", "salesforce", "https://status.salesforce.com/")
                .with_status_url("https://api.status.salesforce.com/v1/instances/status/preview"),
            Transport::new(),
        )
    }

    #[test]
    fn test_all_green_is_operational() {
        let status = adapter()
            .parse(json!({"data": [
                {"attributes": {"color": "green"}},
                {"attributes": {"color": "green"}},
            ]}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::Operational);
    }

    #[test]
    fn test_any_other_color_is_partial_outage() {
        let status = adapter()
            .parse(json!({"data": [
                {"attributes": {"color": "green"}},
                {"attributes": {"color": "yellow"}},
            ]}))
            .unwrap();
        assert_eq!(status.level, StatusLevel::PartialOutage);
    }

    #[test]
    fn test_missing_data_field_is_a_parse_error() {
        match adapter().parse(json!({"instances": []})) {
            Err(VigilError::Parse { vendor, .. }) => assert_eq!(vendor, "salesforce"),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_status_url_is_reported() {
        let bare = SalesforceAdapter::new(
            ServiceRecord::new("salesforce", "salesforce", "https://status.salesforce.com/"),
            Transport::new(),
        );
        match bare.fetch_status().await {
            Err(VigilError::MissingStatusUrl { name }) => assert_eq!(name, "salesforce"),
            other => panic!("expected MissingStatusUrl, got {:?}", other),
        }
    }
}
