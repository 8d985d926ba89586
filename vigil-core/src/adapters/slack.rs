//! Adapter for the Slack status API. The `status` field is loosely typed
//! upstream (string, or false when the page itself is broken), so this
//! adapter inspects the raw JSON value instead of a fixed schema.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{required_status_url, StatusAdapter};
use crate::catalog::ServiceRecord;
use crate::error::Result;
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::Transport;

pub struct SlackAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl SlackAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn derive(&self, value: &Value) -> ServiceStatus {
        let level = match value.get("status") {
            Some(Value::String(s)) if s == "active" => StatusLevel::PartialOutage,
            Some(status) if is_falsy(status) => StatusLevel::Unknown,
            None => StatusLevel::Unknown,
            Some(_) => StatusLevel::Operational,
        };

        let mut status = ServiceStatus::new(&self.record.name, level);
        if let Some(title) = first_incident_title(value) {
            status = status.with_description(title);
        }
        status
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn first_incident_title(value: &Value) -> Option<&str> {
    value
        .get("active_incidents")?
        .as_array()?
        .first()?
        .get("title")?
        .as_str()
}

#[async_trait]
impl StatusAdapter for SlackAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = required_status_url(&self.record)?;
        debug!(service = %self.record.name, url = %url, "checking current status");

        let value = self.transport.fetch_json(&url).await?;
        Ok(self.derive(&value))
    }
}
