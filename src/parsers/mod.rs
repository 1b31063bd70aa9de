//! Format-specific parsers
//!
//! Each parser scans text line by line into local builder state and freezes it
//! into a validated record at the end. `load_*` functions read from disk;
//! `parse_*` functions work on strings and are what the tests exercise.

mod openrc;
mod runit;
mod systemd;

pub use openrc::{load_openrc, parse_openrc};
pub use runit::{load_runit, parse_runit, RunitSources};
pub use systemd::{load_systemd, parse_systemd};

pub(crate) use runit::{script_lines, starts_with_word, Chpst};

/// Split `key=value` around the first `=`, requiring a shell-style identifier key
pub(crate) fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, value.trim()))
}

/// Value of a shell assignment with its quoting removed
pub(crate) fn shell_value(raw: &str) -> String {
    let raw = raw.trim();
    match shlex::split(raw) {
        Some(mut words) if words.len() == 1 => words.remove(0),
        _ => strip_quotes(raw).to_string(),
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}

/// Parse `export KEY=value`, returning the key and unquoted value
pub(crate) fn parse_export(line: &str) -> Option<(&str, String)> {
    let rest = line.strip_prefix("export")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (key, value) = rest.trim_start().split_once('=')?;
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, shell_value(value)))
}
