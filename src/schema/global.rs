//! The unified service record every converter produces

use serde::Serialize;

use super::{Validate, Validator};

/// Format-agnostic description of how to run a daemon
///
/// Field names serialize in camelCase; absent optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalService {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary start command; the only command every format yields
    pub exec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    /// `KEY=VALUE` entries; never `Some(vec![])`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    pub auto_start: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GlobalService {
    /// A record with only the required fields set
    #[cfg(test)]
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            exec: exec.into(),
            start_command: None,
            stop_command: None,
            restart_command: None,
            user: None,
            group: None,
            working_directory: None,
            environment: None,
            dependencies: None,
            auto_start: true,
            notes: None,
        }
    }
}

impl Validate for GlobalService {
    fn check(&self, v: &mut Validator) {
        v.non_empty("name", &self.name, "Service name cannot be empty.");
        v.non_empty("exec", &self.exec, "Execution command cannot be empty.");
        if self.environment.as_ref().is_some_and(Vec::is_empty) {
            v.push("environment", "Environment must be omitted rather than empty.");
        }
        if self.dependencies.as_ref().is_some_and(Vec::is_empty) {
            v.push("dependencies", "Dependencies must be omitted rather than empty.");
        }
    }
}
