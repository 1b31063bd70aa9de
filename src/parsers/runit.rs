//! runit service directory parser
//!
//! The `run` script is read as text, never executed. Only `export` lines,
//! `chpst` privilege flags and `sv start`/`sv check` dependency waits are
//! recognized; finding the primary command is left to the converter.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::{debug, trace};

use super::parse_export;
use crate::classify::has_run_script;
use crate::error::{read_to_string, Error, Result};
use crate::schema::{EnvVars, RunitServiceConfig, Validate, ValidationError};

/// chpst options that take an argument but do not affect user/group
const CHPST_ARG_OPTS: &[&str] = &["-U", "-b", "-e", "-/", "-n", "-l", "-L", "-m", "-d", "-o", "-p", "-f", "-c", "-r"];

/// chpst options without an argument
const CHPST_FLAGS: &[&str] = &["-P", "-0", "-1", "-2", "-v"];

/// Non-blank lines of a script that are not `#` comments, trimmed
pub(crate) fn script_lines(script: &str) -> impl DoubleEndedIterator<Item = &str> {
    script
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

/// If `line` begins with the word `word`, the text after it
pub(crate) fn starts_with_word<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(word)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Split off the first whitespace-delimited word
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Credentials and command of one `chpst` invocation
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Chpst<'a> {
    pub user: Option<&'a str>,
    pub group: Option<&'a str>,
    /// Whatever follows the options
    pub command: &'a str,
}

impl<'a> Chpst<'a> {
    /// Parse the text following the `chpst` word
    pub fn parse(args: &'a str) -> Self {
        let mut chpst = Chpst::default();
        let mut user_group = None;
        let mut rest = args;

        loop {
            let (opt, after) = next_word(rest);
            if opt == "-u" || opt == "-g" {
                let (value, after) = next_word(after);
                if value.is_empty() {
                    break;
                }
                if opt == "-u" {
                    // -u user:group sets both
                    match value.split_once(':') {
                        Some((u, g)) => {
                            chpst.user = Some(u).filter(|u| !u.is_empty());
                            user_group = Some(g).filter(|g| !g.is_empty());
                        }
                        None => chpst.user = Some(value),
                    }
                } else {
                    chpst.group = Some(value);
                }
                rest = after;
            } else if CHPST_ARG_OPTS.contains(&opt) {
                rest = next_word(after).1;
            } else if CHPST_FLAGS.contains(&opt) {
                rest = after;
            } else {
                break;
            }
        }

        chpst.group = chpst.group.or(user_group);
        chpst.command = rest.trim();
        chpst
    }

    /// Find a `chpst` word anywhere in `line` and parse what follows it
    pub fn find(line: &'a str) -> Option<Self> {
        line.match_indices("chpst").find_map(|(i, _)| {
            let before_ok = line[..i]
                .chars()
                .next_back()
                .map_or(true, |c| c.is_whitespace() || c == '/');
            let args = starts_with_word(&line[i..], "chpst")?;
            before_ok.then(|| Chpst::parse(args))
        })
    }
}

/// Services waited on by `sv [-w secs] start|check|up svc...`
fn sv_dependencies(line: &str) -> Vec<String> {
    let (program, mut rest) = next_word(line);
    if program != "sv" && !program.ends_with("/sv") {
        return Vec::new();
    }

    let command = loop {
        let (word, after) = next_word(rest);
        match word {
            "-w" => rest = next_word(after).1,
            "-v" => rest = after,
            _ => {
                rest = after;
                break word;
            }
        }
    };
    if !matches!(command, "start" | "check" | "up") {
        return Vec::new();
    }

    rest.split_whitespace()
        .take_while(|w| !w.starts_with(['|', '&', ';', '>', '<', '#']))
        .map(|w| w.trim_end_matches(';').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Everything read from a service directory
#[derive(Debug, Clone, Default)]
pub struct RunitSources {
    pub service_name: String,
    pub run_script: String,
    pub log_run_script: Option<String>,
    /// Variables from the `env/` directory, if any
    pub envdir: EnvVars,
}

/// Interpret the `run` script of a service directory
pub fn parse_runit(sources: RunitSources) -> std::result::Result<RunitServiceConfig, ValidationError> {
    let mut environment = sources.envdir;
    let mut dependencies: IndexSet<String> = IndexSet::new();
    let mut user = None;
    let mut group = None;

    for line in script_lines(&sources.run_script) {
        if let Some((key, value)) = parse_export(line) {
            environment.insert(key, value);
        }

        // Last chpst invocation wins
        if let Some(chpst) = Chpst::find(line) {
            trace!("chpst: {:?}", chpst);
            if let Some(u) = chpst.user {
                user = Some(u.to_string());
            }
            if let Some(g) = chpst.group {
                group = Some(g.to_string());
            }
        }

        dependencies.extend(sv_dependencies(line));
    }

    let config = RunitServiceConfig {
        service_name: sources.service_name,
        run_script_content: sources.run_script,
        log_run_script_content: sources.log_run_script,
        user,
        group,
        environment,
        dependencies: dependencies.into_iter().collect(),
    };
    config.validate()?;
    Ok(config)
}

/// Read `dir/env/` the way envdir does: file name is the key, first line the value
fn read_envdir(dir: &Path) -> Result<EnvVars> {
    let mut env = EnvVars::new();
    if !dir.is_dir() {
        return Ok(env);
    }

    let io_err = |source: std::io::Error| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .and_then(|entries| entries.map(|e| e.map(|e| e.path())).collect::<std::io::Result<Vec<_>>>())
        .map_err(io_err)?;
    files.retain(|p| p.is_file());
    files.sort();

    for path in files {
        let Some(key) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if key.starts_with('.') {
            continue;
        }
        let content = read_to_string(&path)?;
        let value = content.lines().next().unwrap_or("").trim_end();
        if value.is_empty() {
            continue;
        }
        env.insert(key, value);
    }

    Ok(env)
}

fn service_dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            std::fs::canonicalize(dir)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}

/// Load a runit service directory; fails if it has no `run` file
pub fn load_runit(dir: &Path) -> Result<RunitServiceConfig> {
    if !has_run_script(dir) {
        return Err(Error::MissingRunScript(dir.to_path_buf()));
    }

    let run_script = read_to_string(&dir.join("run"))?;

    let log_run = dir.join("log").join("run");
    let log_run_script = if log_run.is_file() {
        debug!("Reading log script {}", log_run.display());
        Some(read_to_string(&log_run)?)
    } else {
        None
    };

    let sources = RunitSources {
        service_name: service_dir_name(dir),
        run_script,
        log_run_script,
        envdir: read_envdir(&dir.join("env"))?,
    };
    Ok(parse_runit(sources)?)
}
