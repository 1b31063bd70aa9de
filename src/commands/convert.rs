//! Convert a service definition into the unified record

use std::path::Path;

use svcnorm::{Config, ServiceFormat};

use super::CommandResult;

pub fn convert(path: &Path, format: Option<&str>, compact: bool, config: &Config) -> CommandResult {
    let input = match format {
        Some(tag) => {
            let format: ServiceFormat = tag.parse()?;
            svcnorm::load_service_input_as(path, format, config)?
        }
        None => svcnorm::load_service_input(path, config)?,
    };
    log::info!("{}: parsed as {}", path.display(), input.format());

    let service = svcnorm::convert_service(&input)?;
    let json = if compact {
        serde_json::to_string(&service)?
    } else {
        serde_json::to_string_pretty(&service)?
    };
    println!("{}", json);
    Ok(())
}
