//! Tagged service input and routing to the matching converter

use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::classify::{classify, ServiceFormat};
use crate::config::Config;
use crate::convert::{convert_openrc, convert_runit, convert_systemd};
use crate::error::{Error, Result};
use crate::parsers::{load_openrc, load_runit, load_systemd};
use crate::schema::{
    GlobalService, OpenRcServiceConfig, RunitServiceConfig, SystemdServiceConfig, Validate,
};

/// A parsed record tagged with its source format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServiceInput {
    Systemd {
        name: String,
        config: SystemdServiceConfig,
    },
    OpenRc { config: OpenRcServiceConfig },
    Runit { config: RunitServiceConfig },
}

impl ServiceInput {
    pub fn format(&self) -> ServiceFormat {
        match self {
            ServiceInput::Systemd { .. } => ServiceFormat::Systemd,
            ServiceInput::OpenRc { .. } => ServiceFormat::OpenRc,
            ServiceInput::Runit { .. } => ServiceFormat::Runit,
        }
    }

    /// Re-check the carried record against its format's rules
    pub fn validate(&self) -> Result<()> {
        match self {
            ServiceInput::Systemd { config, .. } => config.validate()?,
            ServiceInput::OpenRc { config } => config.validate()?,
            ServiceInput::Runit { config } => config.validate()?,
        }
        Ok(())
    }
}

/// Validate `input` and convert it with the converter for its format
pub fn convert_service(input: &ServiceInput) -> Result<GlobalService> {
    input.validate()?;

    match input {
        ServiceInput::Systemd { name, config } => convert_systemd(name, config),
        ServiceInput::OpenRc { config } => convert_openrc(config),
        ServiceInput::Runit { config } => convert_runit(config),
    }
}

/// Parse `path` with the parser for `format`, skipping classification
pub fn load_service_input_as(path: &Path, format: ServiceFormat, config: &Config) -> Result<ServiceInput> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }

    debug!("Parsing {} as {}", path.display(), format);
    Ok(match format {
        ServiceFormat::Systemd => {
            let (name, config) = load_systemd(path, config)?;
            ServiceInput::Systemd { name, config }
        }
        ServiceFormat::OpenRc => ServiceInput::OpenRc {
            config: load_openrc(path)?,
        },
        ServiceFormat::Runit => ServiceInput::Runit {
            config: load_runit(path)?,
        },
    })
}

/// Classify `path` and parse it
pub fn load_service_input(path: &Path, config: &Config) -> Result<ServiceInput> {
    let format = classify(path, config)?;
    load_service_input_as(path, format, config)
}

/// Full pipeline: classify, parse and convert
pub fn normalize(path: &Path, config: &Config) -> Result<GlobalService> {
    let input = load_service_input(path, config)?;
    convert_service(&input)
}
