//! Known-service catalog.
//!
//! Each record describes one service: which vendor schema its status page
//! speaks (the `host` tag), where the human-facing page lives, and an
//! optional explicit status endpoint for vendors whose endpoint cannot be
//! derived from the web URL.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VigilError};

/// Connection metadata for one service. Owned by the catalog; the rest of
/// the crate treats records as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    /// Raw vendor tag as the catalog stores it. Parsed into a
    /// [`HostKind`](crate::adapters::HostKind) at resolve time so an
    /// unrecognized tag surfaces as a reportable error.
    pub host: String,
    pub web: String,
    #[serde(default)]
    pub urls: Urls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Urls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ServiceRecord {
    pub fn new(name: &str, host: &str, web: &str) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
            web: web.to_string(),
            urls: Urls::default(),
            components: None,
        }
    }

    pub fn with_status_url(mut self, url: &str) -> Self {
        self.urls.status = Some(url.to_string());
        self
    }

    pub fn with_components(mut self, components: &[&str]) -> Self {
        self.components = Some(components.iter().map(|c| c.to_string()).collect());
        self
    }
}

/// Lookup and enumeration over the known services.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ServiceRecord>,
}

impl Catalog {
    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self {
            records: builtin_records(),
        }
    }

    /// A catalog over caller-supplied records, for embedding and tests.
    pub fn from_records(records: Vec<ServiceRecord>) -> Self {
        Self { records }
    }

    /// Case-insensitive lookup by service name.
    pub fn get(&self, name: &str) -> Result<&ServiceRecord> {
        let wanted = name.trim().to_lowercase();
        self.records
            .iter()
            .find(|r| r.name == wanted)
            .ok_or(VigilError::ServiceNotFound(wanted))
    }

    /// All service names, in catalog order.
    pub fn list(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_records() -> Vec<ServiceRecord> {
    vec![
        ServiceRecord::new("github", "atlassian", "https://www.githubstatus.com/")
            .with_components(&[
                "Git Operations",
                "API Requests",
                "Webhooks",
                "Issues",
                "Pull Requests",
                "Actions",
                "Packages",
                "Pages",
            ]),
        ServiceRecord::new("trello", "atlassian", "https://trello.status.atlassian.com/"),
        ServiceRecord::new("cloudflare", "atlassian", "https://www.cloudflarestatus.com/"),
        ServiceRecord::new("npm", "atlassian", "https://status.npmjs.org/"),
        ServiceRecord::new("salesforce", "salesforce", "https://status.salesforce.com/")
            .with_status_url("https://api.status.salesforce.com/v1/instances/status/preview"),
        ServiceRecord::new("wordpress", "automattic", "https://automatticstatus.com/")
            .with_status_url("https://automatticstatus.com/feed"),
        ServiceRecord::new("planetscale", "status.io", "https://www.planetscalestatus.com/")
            .with_status_url("https://api.status.io/1.0/status/5e0ad7f6006f6f13390373d5"),
        ServiceRecord::new("docker", "status.io-html", "https://status.docker.com/"),
        ServiceRecord::new("slack", "slack", "https://status.slack.com/")
            .with_status_url("https://status.slack.com/api/v2.0.0/current")
            .with_components(&[
                "Messaging",
                "Calls",
                "Apps/Integrations/APIs",
                "Workspace/Org Administration",
            ]),
        ServiceRecord::new("linear", "incident.io", "https://status.linear.app/"),
    ]
}
