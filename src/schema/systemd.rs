//! Typed systemd .service records
//!
//! Only the directives that map onto the unified record are kept; everything
//! else in a unit file is ignored by the parser.

use serde::Serialize;

use super::{Validate, Validator};

/// Service type determines startup notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Simple,   // Ready immediately after exec
    Forking,  // Ready when main process exits
    Oneshot,  // Run once, no main process
    Notify,   // Ready on sd_notify READY=1
    Idle,     // Like simple, delayed until jobs are dispatched
}

impl ServiceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "forking" => Some(Self::Forking),
            "oneshot" => Some(Self::Oneshot),
            "notify" => Some(Self::Notify),
            "idle" => Some(Self::Idle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Forking => "forking",
            Self::Oneshot => "oneshot",
            Self::Notify => "notify",
            Self::Idle => "idle",
        }
    }
}

/// [Unit] section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitSection {
    pub description: Option<String>,
    pub documentation: Option<String>,
    pub after: Vec<String>,
    pub requires: Vec<String>,
}

/// [Service] section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceSection {
    /// `None` when the unit file has no Type= line
    #[serde(rename = "Type")]
    pub service_type: Option<ServiceType>,

    // Execution
    pub exec_start: String,
    pub exec_stop: Option<String>,
    pub exec_reload: Option<String>,

    // Credentials
    pub user: Option<String>,
    pub group: Option<String>,
    pub working_directory: Option<String>,

    /// Raw `KEY=VALUE` tokens in file order
    pub environment: Vec<String>,

    #[serde(rename = "PIDFile")]
    pub pid_file: Option<String>,
}

/// [Install] section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallSection {
    pub wanted_by: Vec<String>,
    pub required_by: Vec<String>,
}

/// Complete parsed service unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub struct SystemdServiceConfig {
    pub unit: UnitSection,
    pub service: ServiceSection,
    pub install: InstallSection,
}

impl Validate for SystemdServiceConfig {
    fn check(&self, v: &mut Validator) {
        v.non_empty(
            "service.ExecStart",
            &self.service.exec_start,
            "Systemd ExecStart command is required.",
        );
    }
}
