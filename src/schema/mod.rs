//! Record shapes and their validation rules
//!
//! Every per-format record and the unified record implement [`Validate`].
//! Validation never stops at the first problem: all issues for a record are
//! collected into one [`ValidationError`].

mod global;
mod openrc;
mod runit;
mod systemd;

pub use global::GlobalService;
pub use openrc::OpenRcServiceConfig;
pub use runit::RunitServiceConfig;
pub use systemd::{InstallSection, ServiceSection, ServiceType, SystemdServiceConfig, UnitSection};

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted path to the offending field (e.g. `service.ExecStart`)
    pub path: String,
    pub message: String,
}

/// All rule violations found in one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema validation failed")?;
        for issue in &self.issues {
            write!(f, "\n- {}: {}", issue.path, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collects issues while a record is checked
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Record an issue if `value` is empty
    pub fn non_empty(&mut self, path: &str, value: &str, message: &str) {
        if value.is_empty() {
            self.push(path, message);
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.issues })
        }
    }
}

/// Field-level rules of a record
pub trait Validate {
    /// Push every violated rule into `v`
    fn check(&self, v: &mut Validator);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        self.check(&mut v);
        v.finish()
    }
}

/// Environment variables in first-insertion order; re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvVars(IndexMap<String, String>);

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `KEY=VALUE` strings, or `None` when there are no variables
    pub fn to_assignments(&self) -> Option<Vec<String>> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.iter().map(|(k, v)| format!("{}={}", k, v)).collect())
    }
}

/// Dedupe keeping the first occurrence; `None` when nothing is left
pub(crate) fn unique_or_none<I>(items: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    let unique: IndexSet<String> = items.into_iter().collect();
    if unique.is_empty() {
        None
    } else {
        Some(unique.into_iter().collect())
    }
}
