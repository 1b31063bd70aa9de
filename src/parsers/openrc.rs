//! OpenRC init script parser
//!
//! Init scripts are shell, so this only recognizes the metadata assignments
//! openrc-run itself reads, plus the `depend()` function body.

use std::path::Path;

use log::trace;

use super::{parse_export, shell_value, split_assignment};
use crate::error::{read_to_string, Result};
use crate::schema::{OpenRcServiceConfig, Validate, ValidationError};

/// Statements inside `depend()` that name services this one runs after
const DEPEND_KEYWORDS: &[&str] = &["need", "use", "want", "after"];

#[derive(Default)]
struct ScriptBuilder {
    config: OpenRcServiceConfig,
    depend: Vec<String>,
    command_user: Option<String>,
    in_depend: bool,
}

impl ScriptBuilder {
    fn comment(&mut self, line: &str) {
        // A shebang is not a description
        if line.starts_with("#!") {
            return;
        }
        let text = line.trim_start_matches('#').trim();
        if self.config.description.is_none() && !text.is_empty() {
            self.config.description = Some(text.to_string());
        }
    }

    fn assign(&mut self, key: &str, raw: &str) {
        let value = shell_value(raw);
        let cfg = &mut self.config;
        match key {
            // An identifier, not a display name
            "name" if !value.contains(char::is_whitespace) => cfg.service_name = value,
            "description" => cfg.description = Some(value),
            "command" => cfg.command = Some(value),
            "command_args" => cfg.command_args = Some(value),
            "start_stop_daemon_args" => cfg.start_stop_daemon_args = Some(value),
            "pidfile" => cfg.pidfile = Some(value),
            "user" => cfg.user = Some(value),
            "group" => cfg.group = Some(value),
            "command_user" => self.command_user = Some(value),
            "depend" => self.depend.extend(value.split_whitespace().map(str::to_string)),
            _ => trace!("Ignoring init script variable {}", key),
        }
    }

    /// Scan `depend()` body text; returns once the closing brace is seen
    fn depend_body(&mut self, body: &str) {
        for statement in body.split(';') {
            let (statement, closed) = match statement.split_once('}') {
                Some((before, _)) => (before, true),
                None => (statement, false),
            };

            let mut words = statement
                .split_whitespace()
                .take_while(|w| !w.starts_with('#'));
            if let Some(keyword) = words.next() {
                if DEPEND_KEYWORDS.contains(&keyword) {
                    self.depend.extend(words.map(str::to_string));
                }
            }

            if closed {
                self.in_depend = false;
                return;
            }
        }
    }

    fn build(self) -> std::result::Result<OpenRcServiceConfig, ValidationError> {
        let mut config = self.config;

        if let Some(command_user) = self.command_user {
            let (user, group) = match command_user.split_once(':') {
                Some((u, g)) => (u.to_string(), Some(g.to_string())),
                None => (command_user, None),
            };
            if config.user.is_none() && !user.is_empty() {
                config.user = Some(user);
            }
            if config.group.is_none() {
                config.group = group.filter(|g| !g.is_empty());
            }
        }

        if !self.depend.is_empty() {
            config.depend = Some(self.depend);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Body text following `depend() {`, if `line` opens the depend function
fn depend_opening(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("depend")?.trim_start().strip_prefix("()")?.trim_start();
    Some(rest.strip_prefix('{').unwrap_or(rest))
}

/// Parse init script text; `default_name` is used when there is no `name=` line
pub fn parse_openrc(
    default_name: &str,
    content: &str,
) -> std::result::Result<OpenRcServiceConfig, ValidationError> {
    let mut builder = ScriptBuilder::default();
    builder.config.service_name = default_name.to_string();

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            builder.comment(line);
            continue;
        }

        if builder.in_depend {
            builder.depend_body(line);
            continue;
        }

        if let Some(body) = depend_opening(line) {
            builder.in_depend = true;
            builder.depend_body(body);
            continue;
        }

        if let Some((key, value)) = parse_export(line) {
            builder.config.environment.insert(key, value);
            continue;
        }

        if let Some((key, value)) = split_assignment(line) {
            builder.assign(key, value);
        }
    }

    builder.build()
}

/// Read an init script; its file name is the default service name
pub fn load_openrc(path: &Path) -> Result<OpenRcServiceConfig> {
    let default_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let content = read_to_string(path)?;
    Ok(parse_openrc(default_name, &content)?)
}
