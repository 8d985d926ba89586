//! Vendor-specific status adapters.
//!
//! Every supported status-page vendor gets one adapter pairing a URL
//! derivation rule with a parse-to-status rule. The dispatch from host kind
//! to adapter is a closed match, so a kind without an adapter cannot be
//! registered; unknown catalog tags are rejected before dispatch.

mod atlassian;
mod automattic;
mod incidentio;
mod salesforce;
mod slack;
mod statusio;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

pub use atlassian::AtlassianAdapter;
pub use automattic::AutomatticAdapter;
pub use incidentio::IncidentIoAdapter;
pub use salesforce::SalesforceAdapter;
pub use slack::SlackAdapter;
pub use statusio::{StatusIoAdapter, StatusIoHtmlAdapter};

use crate::catalog::ServiceRecord;
use crate::error::{Result, VigilError};
use crate::status::ServiceStatus;
use crate::transport::Transport;

/// Vendor schema tag. One variant per supported upstream API shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Atlassian,
    Salesforce,
    Automattic,
    StatusIo,
    StatusIoHtml,
    Slack,
    IncidentIo,
}

impl std::str::FromStr for HostKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "atlassian" => Ok(HostKind::Atlassian),
            "salesforce" => Ok(HostKind::Salesforce),
            "automattic" => Ok(HostKind::Automattic),
            "status.io" => Ok(HostKind::StatusIo),
            "status.io-html" => Ok(HostKind::StatusIoHtml),
            "slack" => Ok(HostKind::Slack),
            "incident.io" => Ok(HostKind::IncidentIo),
            _ => Err(format!("unknown host kind: {}", s)),
        }
    }
}

/// Contract every vendor adapter satisfies.
///
/// An adapter is constructed per query and holds only its catalog record
/// and the transport it fetches through. `fetch_status` performs exactly
/// one network round trip and never retries.
#[async_trait]
pub trait StatusAdapter: Send + Sync {
    fn record(&self) -> &ServiceRecord;

    fn transport(&self) -> &Transport;

    /// The endpoint this adapter will query. An explicit catalog URL wins;
    /// vendors with a derivation rule override this to fall back to it.
    fn status_url(&self) -> Option<String> {
        self.record().urls.status.clone()
    }

    /// One fetch, one parse, one normalized status.
    async fn fetch_status(&self) -> Result<ServiceStatus>;

    /// Component list from the catalog record, verbatim. No network.
    fn components(&self) -> &[String] {
        self.record().components.as_deref().unwrap_or_default()
    }

    /// Open the service's web page in the user's browser. Best-effort.
    fn open_web(&self) {
        self.transport().open_in_browser(&self.record().web);
    }
}

/// Builds the adapter for a catalog record, or reports why it cannot.
pub fn resolve(record: &ServiceRecord, transport: &Transport) -> Result<Box<dyn StatusAdapter>> {
    let kind: HostKind = record
        .host
        .parse()
        .map_err(|_| VigilError::UnsupportedHost {
            name: record.name.clone(),
            host: record.host.clone(),
        })?;

    Ok(adapter_for(kind, record.clone(), transport.clone()))
}

fn adapter_for(kind: HostKind, record: ServiceRecord, transport: Transport) -> Box<dyn StatusAdapter> {
    match kind {
        HostKind::Atlassian => Box::new(AtlassianAdapter::new(record, transport)),
        HostKind::Salesforce => Box::new(SalesforceAdapter::new(record, transport)),
        HostKind::Automattic => Box::new(AutomatticAdapter::new(record, transport)),
        HostKind::StatusIo => Box::new(StatusIoAdapter::new(record, transport)),
        HostKind::StatusIoHtml => Box::new(StatusIoHtmlAdapter::new(record, transport)),
        HostKind::Slack => Box::new(SlackAdapter::new(record, transport)),
        HostKind::IncidentIo => Box::new(IncidentIoAdapter::new(record, transport)),
    }
}

static DUPLICATE_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:]/)/+").expect("invalid slash-collapse pattern"));

/// Collapses any run of slashes that is not part of a scheme prefix, so
/// joining a web URL with a path cannot produce `.com//api`.
pub(crate) fn collapse_duplicate_slashes(url: &str) -> String {
    DUPLICATE_SLASHES.replace_all(url, "$1").into_owned()
}

/// The explicit status URL, required for vendors with no derivation rule.
pub(crate) fn required_status_url(record: &ServiceRecord) -> Result<String> {
    record
        .urls
        .status
        .clone()
        .ok_or_else(|| VigilError::MissingStatusUrl {
            name: record.name.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn transport() -> Transport {
        Transport::new()
    }

    #[test]
    fn test_collapse_duplicate_slashes_preserves_scheme() {
        assert_eq!(
            collapse_duplicate_slashes("https://example.com//api//v2/status.json"),
            "https://example.com/api/v2/status.json"
        );
        assert_eq!(
            collapse_duplicate_slashes("https://example.com/api/v2/status.json"),
            "https://example.com/api/v2/status.json"
        );
    }

    #[test]
    fn test_host_kind_parses_all_catalog_tags() {
        for tag in [
            "atlassian",
            "salesforce",
            "automattic",
            "status.io",
            "status.io-html",
            "slack",
            "incident.io",
        ] {
            assert!(tag.parse::<HostKind>().is_ok(), "tag {} did not parse", tag);
        }
        assert!("mystery".parse::<HostKind>().is_err());
    }

    #[test]
    fn test_resolve_builds_adapter_for_every_builtin_record() {
        for record in Catalog::builtin().records() {
            let adapter = resolve(record, &transport()).expect("builtin record must resolve");
            assert_eq!(adapter.record().name, record.name);
        }
    }

    #[test]
    fn test_resolve_unknown_host_is_unsupported_not_missing() {
        let record = ServiceRecord::new("example", "mystery", "https://example.com/");
        match resolve(&record, &transport()) {
            Err(VigilError::UnsupportedHost { name, host }) => {
                assert_eq!(name, "example");
                assert_eq!(host, "mystery");
            }
            other => panic!("expected UnsupportedHost, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_components_come_from_the_record_verbatim() {
        let record = ServiceRecord::new("example", "atlassian", "https://example.com/")
            .with_components(&["API", "Web"]);
        let adapter = resolve(&record, &transport()).unwrap();
        assert_eq!(adapter.components(), ["API".to_string(), "Web".to_string()]);

        let bare = ServiceRecord::new("bare", "atlassian", "https://example.com/");
        let adapter = resolve(&bare, &transport()).unwrap();
        assert!(adapter.components().is_empty());
    }
}
