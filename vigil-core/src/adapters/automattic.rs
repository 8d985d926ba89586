//! Adapter for Automattic-style status feeds. The status page is an RSS
//! feed with one entry per component; a healthy component's title ends in
//! "- Operational".

use async_trait::async_trait;
use tracing::debug;

use super::{required_status_url, StatusAdapter};
use crate::catalog::ServiceRecord;
use crate::error::Result;
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::{FeedItem, Transport};

const OPERATIONAL_SUFFIX: &str = "- Operational";

pub struct AutomatticAdapter {
    record: ServiceRecord,
    transport: Transport,
}

impl AutomatticAdapter {
    pub fn new(record: ServiceRecord, transport: Transport) -> Self {
        Self { record, transport }
    }

    fn derive(&self, items: &[FeedItem]) -> ServiceStatus {
        let level = if items.iter().all(|i| i.title.ends_with(OPERATIONAL_SUFFIX)) {
            StatusLevel::Operational
        } else {
            StatusLevel::PartialOutage
        };

        ServiceStatus::new(&self.record.name, level)
    }
}

#[async_trait]
impl StatusAdapter for AutomatticAdapter {
    fn record(&self) -> &ServiceRecord {
        &self.record
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn fetch_status(&self) -> Result<ServiceStatus> {
        let url = required_status_url(&self.record)?;
        debug!(service = %self.record.name, url = %url, "checking status feed");

        let items = self.transport.fetch_feed(&url).await?;
        Ok(self.derive(&items))
    }
}
