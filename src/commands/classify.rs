//! Print the detected format of a path

use std::path::Path;

use svcnorm::Config;

use super::CommandResult;

pub fn classify(path: &Path, config: &Config) -> CommandResult {
    let format = svcnorm::classify(path, config)?;
    println!("{}", format);
    Ok(())
}
