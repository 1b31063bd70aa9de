//! OpenRC init script to unified record

use log::debug;

use crate::error::Result;
use crate::schema::{GlobalService, OpenRcServiceConfig, Validate};

/// Map a parsed init script onto the unified record
///
/// `command` plus `command_args` wins over `start_stop_daemon_args`. A script
/// with neither (or with both set to "") yields an empty `exec` and fails
/// validation.
pub fn convert_openrc(config: &OpenRcServiceConfig) -> Result<GlobalService> {
    // command="" counts as unset
    let command = config.command.as_deref().filter(|c| !c.is_empty());
    let daemon_args = config.start_stop_daemon_args.as_deref().filter(|a| !a.is_empty());

    let exec = if let Some(command) = command {
        format!("{} {}", command, config.command_args.as_deref().unwrap_or(""))
            .trim()
            .to_string()
    } else if let Some(args) = daemon_args {
        format!("start-stop-daemon {}", args)
    } else {
        String::new()
    };

    let global = GlobalService {
        name: config.service_name.clone(),
        description: config.description.clone(),
        exec,
        start_command: None,
        stop_command: None,
        restart_command: None,
        user: config.user.clone(),
        group: config.group.clone(),
        working_directory: None,
        environment: config.environment.to_assignments(),
        dependencies: config.depend.clone().filter(|d| !d.is_empty()),
        auto_start: true,
        notes: Some(format!(
            "Converted from OpenRC. PIDFile: {}.",
            config.pidfile.as_deref().unwrap_or("N/A")
        )),
    };

    debug!("Converted OpenRC script {}", config.service_name);
    global.validate()?;
    Ok(global)
}
