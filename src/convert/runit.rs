//! runit service directory to unified record
//!
//! The primary command is the last `exec` or `chpst` line of the `run`
//! script, found by scanning backwards.

use log::{debug, warn};

use crate::error::Result;
use crate::parsers::{script_lines, starts_with_word, Chpst};
use crate::schema::{GlobalService, RunitServiceConfig, Validate};

pub const RUNIT_NOTES: &str = "Converted from runit. `run` script parsing is a simplification; \
                               verify `exec` command, user, and group.";

/// Primary command plus any credentials found on its line
#[derive(Debug, Default, PartialEq)]
struct PrimaryExec<'a> {
    command: &'a str,
    user: Option<&'a str>,
    group: Option<&'a str>,
}

/// Scan the run script backwards for the last `exec` or `chpst` line
fn primary_exec(script: &str) -> PrimaryExec<'_> {
    for line in script_lines(script).rev() {
        if let Some(rest) = starts_with_word(line, "exec") {
            return PrimaryExec {
                command: rest.trim(),
                ..Default::default()
            };
        }
        if let Some(args) = starts_with_word(line, "chpst") {
            let chpst = Chpst::parse(args);
            let command = starts_with_word(chpst.command, "exec")
                .map(str::trim)
                .unwrap_or(chpst.command);
            return PrimaryExec {
                command,
                user: chpst.user,
                group: chpst.group,
            };
        }
    }
    PrimaryExec::default()
}

/// Map a parsed service directory onto the unified record
pub fn convert_runit(config: &RunitServiceConfig) -> Result<GlobalService> {
    let primary = primary_exec(&config.run_script_content);
    if primary.command.is_empty() {
        warn!("{}: no exec or chpst line in run script", config.service_name);
    }

    let global = GlobalService {
        name: config.service_name.clone(),
        description: None,
        exec: primary.command.to_string(),
        start_command: None,
        stop_command: None,
        restart_command: None,
        user: primary.user.map(str::to_string).or_else(|| config.user.clone()),
        group: primary.group.map(str::to_string).or_else(|| config.group.clone()),
        working_directory: None,
        environment: config.environment.to_assignments(),
        dependencies: Some(config.dependencies.clone()).filter(|d| !d.is_empty()),
        auto_start: true,
        notes: Some(RUNIT_NOTES.to_string()),
    };

    debug!("Converted runit service {}", config.service_name);
    global.validate()?;
    Ok(global)
}
