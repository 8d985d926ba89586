//! Canonical status levels and their exit-code contract.

use serde::{Deserialize, Serialize};

/// Normalized outcome of a status query, independent of vendor schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Operational,
    PartialOutage,
    MajorOutage,
    Maintenance,
    /// The upstream endpoint answered but reported nothing usable.
    Unknown,
}

/// Display tier used when presenting a level to a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Pass,
    Warn,
    Fail,
}

impl StatusLevel {
    /// Process exit code for this level. The table is fixed: adding a
    /// vendor must never change it.
    pub const fn exit_code(self) -> u8 {
        match self {
            StatusLevel::Operational => 0,
            StatusLevel::Unknown => 1,
            StatusLevel::PartialOutage => 2,
            StatusLevel::MajorOutage => 3,
            StatusLevel::Maintenance => 4,
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            StatusLevel::Operational => Severity::Pass,
            StatusLevel::PartialOutage | StatusLevel::Maintenance => Severity::Warn,
            StatusLevel::MajorOutage | StatusLevel::Unknown => Severity::Fail,
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StatusLevel::Operational => "Operational",
            StatusLevel::PartialOutage => "Partial Outage",
            StatusLevel::MajorOutage => "Major Outage",
            StatusLevel::Maintenance => "Maintenance",
            StatusLevel::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// Result of one status query against one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub service: String,
    pub level: StatusLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServiceStatus {
    pub fn new(service: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            service: service.into(),
            level,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.description = Some(description);
        }
        self
    }
}
