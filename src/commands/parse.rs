//! Display the format-specific record without converting it

use std::path::Path;

use svcnorm::{Config, ServiceFormat};

use super::CommandResult;

pub fn parse(path: &Path, format: Option<&str>, config: &Config) -> CommandResult {
    let input = match format {
        Some(tag) => svcnorm::load_service_input_as(path, tag.parse::<ServiceFormat>()?, config)?,
        None => svcnorm::load_service_input(path, config)?,
    };
    println!("{}", serde_json::to_string_pretty(&input)?);
    Ok(())
}
