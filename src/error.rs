//! Error types shared by the classifier, parsers, converters and dispatcher

use std::path::{Path, PathBuf};

use crate::schema::ValidationError;

/// Any failure while turning a path into a unified service record
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Could not determine service type for path: {}.\n{supported}", path.display())]
    UnrecognizedFormat { path: PathBuf, supported: String },

    #[error("Runit service directory \"{}\" does not contain a 'run' script", .0.display())]
    MissingRunScript(PathBuf),

    #[error(transparent)]
    FieldValidation(#[from] ValidationError),

    #[error("Unsupported service type: {0}")]
    UnsupportedServiceType(String),

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a whole file, attaching the path to any I/O error
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
