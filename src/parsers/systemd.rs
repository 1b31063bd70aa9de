//! INI-style unit file parser
//!
//! Reads the [Unit], [Service] and [Install] sections of a .service file into
//! a [`SystemdServiceConfig`]. Unknown sections and keys are skipped.

use std::path::Path;

use log::trace;

use super::split_assignment;
use crate::config::Config;
use crate::error::{read_to_string, Result};
use crate::schema::{ServiceType, SystemdServiceConfig, Validate, ValidationError, Validator};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Unit,
    Service,
    Install,
    /// Any other [Header] such as [X-Foo]; its lines are ignored rather
    /// than attributed to the section before it, matching systemd
    Other,
}

impl Section {
    /// Parse a `[Name]` header line
    fn from_header(line: &str) -> Option<Self> {
        let name = line.strip_prefix('[')?.strip_suffix(']')?;
        Some(if name.eq_ignore_ascii_case("unit") {
            Section::Unit
        } else if name.eq_ignore_ascii_case("service") {
            Section::Service
        } else if name.eq_ignore_ascii_case("install") {
            Section::Install
        } else {
            Section::Other
        })
    }
}

/// Accumulates directives while scanning; frozen by `build`
#[derive(Default)]
struct UnitBuilder {
    config: SystemdServiceConfig,
    raw_type: Option<String>,
}

/// Split a multi-valued directive into its whitespace-separated tokens
fn push_tokens(target: &mut Vec<String>, value: &str) {
    target.extend(value.split_whitespace().map(str::to_string));
}

impl UnitBuilder {
    fn set(&mut self, section: Section, key: &str, value: &str) {
        let cfg = &mut self.config;
        match (section, key) {
            (Section::Unit, "Description") => cfg.unit.description = Some(value.to_string()),
            (Section::Unit, "Documentation") => cfg.unit.documentation = Some(value.to_string()),
            (Section::Unit, "After") => push_tokens(&mut cfg.unit.after, value),
            (Section::Unit, "Requires") => push_tokens(&mut cfg.unit.requires, value),

            (Section::Service, "Type") => self.raw_type = Some(value.to_string()),
            (Section::Service, "ExecStart") => cfg.service.exec_start = value.to_string(),
            (Section::Service, "ExecStop") => cfg.service.exec_stop = Some(value.to_string()),
            (Section::Service, "ExecReload") => cfg.service.exec_reload = Some(value.to_string()),
            (Section::Service, "User") => cfg.service.user = Some(value.to_string()),
            (Section::Service, "Group") => cfg.service.group = Some(value.to_string()),
            (Section::Service, "WorkingDirectory") => {
                cfg.service.working_directory = Some(value.to_string())
            }
            (Section::Service, "PIDFile") => cfg.service.pid_file = Some(value.to_string()),
            (Section::Service, "Environment") => push_tokens(&mut cfg.service.environment, value),

            (Section::Install, "WantedBy") => push_tokens(&mut cfg.install.wanted_by, value),
            (Section::Install, "RequiredBy") => push_tokens(&mut cfg.install.required_by, value),

            _ => trace!("Ignoring {:?} directive {}", section, key),
        }
    }

    fn build(self) -> std::result::Result<SystemdServiceConfig, ValidationError> {
        let mut config = self.config;
        let mut v = Validator::new();

        if let Some(raw) = self.raw_type {
            match ServiceType::parse(&raw) {
                Some(t) => config.service.service_type = Some(t),
                None => v.push(
                    "service.Type",
                    format!(
                        "Invalid enum value. Expected 'simple' | 'forking' | 'oneshot' | 'notify' | 'idle', received '{}'",
                        raw
                    ),
                ),
            }
        }

        config.check(&mut v);
        v.finish()?;
        Ok(config)
    }
}

/// Parse unit file text into a validated record
pub fn parse_systemd(content: &str) -> std::result::Result<SystemdServiceConfig, ValidationError> {
    let mut builder = UnitBuilder::default();
    let mut section = None;

    for line in content.lines().map(str::trim) {
        // Skip comments and empty lines
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(s) = Section::from_header(line) {
            section = Some(s);
            continue;
        }

        // Lines before the first section or inside an unknown one
        let Some(current) = section.filter(|s| *s != Section::Other) else {
            continue;
        };

        if let Some((key, value)) = split_assignment(line) {
            builder.set(current, key, value);
        }
    }

    builder.build()
}

/// Read a unit file and derive the service name from its file name
pub fn load_systemd(path: &Path, config: &Config) -> Result<(String, SystemdServiceConfig)> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let name = match config.unit_suffix(file_name) {
        Some(suffix) => &file_name[..file_name.len() - suffix.len()],
        None => file_name,
    };

    let content = read_to_string(path)?;
    let parsed = parse_systemd(&content)?;
    Ok((name.to_string(), parsed))
}
