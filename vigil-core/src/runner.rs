//! Drives one-or-many status queries against the catalog.

use tracing::{debug, info, instrument};

use crate::adapters::{self, StatusAdapter};
use crate::catalog::{Catalog, ServiceRecord};
use crate::error::{Result, VigilError};
use crate::status::{ServiceStatus, StatusLevel};
use crate::transport::Transport;

pub struct StatusRunner {
    catalog: Catalog,
    transport: Transport,
}

impl Default for StatusRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRunner {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::builtin(),
            transport: Transport::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog records whose host kind has an adapter, in catalog order.
    pub fn supported(&self) -> Vec<&ServiceRecord> {
        self.catalog
            .records()
            .iter()
            .filter(|r| r.host.parse::<adapters::HostKind>().is_ok())
            .collect()
    }

    /// Look a service up by name and build its adapter.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn StatusAdapter>> {
        let record = self.catalog.get(name)?;
        info!(service = %record.name, host = %record.host, "found configuration");
        adapters::resolve(record, &self.transport)
    }

    /// Query one service and return its normalized status.
    #[instrument(skip(self), fields(service = %name))]
    pub async fn check(&self, name: &str) -> Result<ServiceStatus> {
        let adapter = self.resolve(name)?;
        let status = adapter.fetch_status().await?;
        debug!(service = %status.service, level = %status.level, "query finished");
        Ok(status)
    }

    /// Query every supported service sequentially, in catalog order.
    ///
    /// Fail-fast: the first failing service aborts the run with its error.
    /// `on_result` fires after each successful query so completed results
    /// are surfaced before a later failure.
    pub async fn check_all<F>(&self, mut on_result: F) -> Result<Vec<ServiceStatus>>
    where
        F: FnMut(&ServiceStatus),
    {
        let names: Vec<String> = self
            .supported()
            .iter()
            .map(|r| r.name.clone())
            .collect();

        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let status = self.check(&name).await?;
            on_result(&status);
            results.push(status);
        }
        Ok(results)
    }

    /// Open the service's web page without querying its status.
    pub fn open_web(&self, name: &str) -> Result<()> {
        let adapter = self.resolve(name)?;
        adapter.open_web();
        Ok(())
    }

    /// The service's component list from the catalog. No network.
    pub fn components(&self, name: &str) -> Result<Vec<String>> {
        let adapter = self.resolve(name)?;
        Ok(adapter.components().to_vec())
    }

    /// Check that `component` exists for the service.
    pub fn verify_component(&self, name: &str, component: &str) -> Result<()> {
        let known = self.components(name)?;
        if known.iter().any(|c| c.eq_ignore_ascii_case(component)) {
            Ok(())
        } else {
            Err(VigilError::UnknownComponent {
                name: name.to_lowercase(),
                component: component.to_string(),
            })
        }
    }
}

/// Program-level outcome of a multi-service run: the worst level seen.
pub fn overall_level(results: &[ServiceStatus]) -> StatusLevel {
    results
        .iter()
        .map(|s| s.level)
        .max_by_key(|level| level.severity())
        .unwrap_or(StatusLevel::Operational)
}
