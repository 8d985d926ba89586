//! Adapter for incident.io-hosted status pages. These pages do not expose
//! a status summary directly; instead the page's own incident proxy is
//! queried at `<web>/proxy/<page-host>/incidents` and the service counts as
//! healthy when no incident is open.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{collapse_duplicate_slashes, StatusAdapter};
use crate::catalog::ServiceRecord;
use crate::error::{Result, VigilError};
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::Transport;

const VENDOR: &str = "incident.io";

#[derive(Debug, Deserialize)]
struct IncidentsPayload {
    incidents: Vec<Incident>,
}

#[derive(Debug, Deserialize)]
struct Incident {
    status: String,
}

pub struct IncidentIoAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl IncidentIoAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn derived_url(&self) -> Option<String> {
        let web = Url::parse(&self.record.web).ok()?;
        let host = web.host_str()?;
        Some(collapse_duplicate_slashes(&format!(
            "{}/proxy/{}/incidents",
            self.record.web, host
        )))
    }

    fn parse(&self, value: serde_json::Value) -> Result<ServiceStatus> {
        let payload: IncidentsPayload =
            serde_json::from_value(value).map_err(|e| VigilError::Parse {
                vendor: VENDOR,
                reason: e.to_string(),
            })?;

        let level = if payload.incidents.iter().all(|i| i.status == "resolved") {
            StatusLevel::Operational
        } else {
            StatusLevel::PartialOutage
        };

        Ok(ServiceStatus::new(&self.record.name, level))
    }
}

#[async_trait]
impl StatusAdapter for IncidentIoAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn status_url(&self) -> Option<String> {
        self.record.urls.status.clone().or_else(|| self.derived_url())
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = self
            .status_url()
            .ok_or_else(|| VigilError::MissingStatusUrl {
                name: self.record.name.clone(),
            })?;
        debug!(service = %self.record.name, url = %url, "checking incident proxy");

        let value = self.transport.fetch_json(&url).await?;
        self.parse(value)
    }
}
