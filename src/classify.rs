//! Decide which init system a path belongs to
//!
//! Only file metadata is inspected; contents are left to the parsers.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};

/// The closed set of supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceFormat {
    Systemd,
    OpenRc,
    Runit,
}

impl ServiceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceFormat::Systemd => "systemd",
            ServiceFormat::OpenRc => "openrc",
            ServiceFormat::Runit => "runit",
        }
    }
}

impl fmt::Display for ServiceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "systemd" => Ok(ServiceFormat::Systemd),
            "openrc" => Ok(ServiceFormat::OpenRc),
            "runit" => Ok(ServiceFormat::Runit),
            _ => Err(Error::UnsupportedServiceType(s.to_string())),
        }
    }
}

/// Classify `path` by suffix, location and directory layout
pub fn classify(path: &Path, config: &Config) -> Result<ServiceFormat> {
    let meta = std::fs::metadata(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => Error::PathNotFound(path.to_path_buf()),
        _ => Error::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if meta.is_file() {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if config.unit_suffix(file_name).is_some() {
            log::debug!("{}: unit file suffix, treating as systemd", path.display());
            return Ok(ServiceFormat::Systemd);
        }
        if config.is_under_init_dir(path) {
            log::debug!("{}: in init script directory, treating as OpenRC", path.display());
            return Ok(ServiceFormat::OpenRc);
        }
    } else if meta.is_dir() {
        if has_run_script(path) {
            if config.is_under_runit_dir(path) {
                log::debug!("{}: runit service directory", path.display());
            } else {
                log::debug!(
                    "{}: has a run script outside the usual service directories, treating as runit",
                    path.display()
                );
            }
            return Ok(ServiceFormat::Runit);
        }
        if config.is_under_runit_dir(path) {
            log::warn!(
                "{}: looks like a runit service directory but has no run script",
                path.display()
            );
        }
    }

    Err(Error::UnrecognizedFormat {
        path: path.to_path_buf(),
        supported: config.describe_conventions(),
    })
}

/// True if `dir/run` is a regular file (symlinks followed)
pub(crate) fn has_run_script(dir: &Path) -> bool {
    dir.join("run").is_file()
}
