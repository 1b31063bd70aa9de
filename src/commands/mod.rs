mod classify;
mod convert;
mod parse;

pub use classify::classify;
pub use convert::convert;
pub use parse::parse;

/// Result type shared by the subcommands
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
