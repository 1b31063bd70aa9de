mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use svcnorm::{Config, Error};

#[derive(Parser)]
#[command(name = "svcnorm")]
#[command(about = "Normalize systemd, OpenRC and runit service definitions")]
struct Args {
    /// Extra directory holding OpenRC init scripts (repeatable)
    #[arg(long = "init-dir", global = true)]
    init_dirs: Vec<PathBuf>,

    /// Extra directory holding runit service directories (repeatable)
    #[arg(long = "runit-dir", global = true)]
    runit_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a service definition into the unified JSON record
    Convert {
        /// Unit file, init script, or runit service directory
        path: PathBuf,

        /// Skip detection and parse as this format (systemd, openrc, runit)
        #[arg(long, short = 'f')]
        format: Option<String>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Show which format a path is detected as
    Classify {
        /// Path to inspect
        path: PathBuf,
    },

    /// Parse a service definition and display the format-specific record
    Parse {
        /// Unit file, init script, or runit service directory
        path: PathBuf,

        /// Skip detection and parse as this format (systemd, openrc, runit)
        #[arg(long, short = 'f')]
        format: Option<String>,
    },
}

fn report(err: &(dyn std::error::Error + 'static)) {
    match err.downcast_ref::<Error>() {
        Some(Error::FieldValidation(v)) => {
            eprintln!("Schema Validation Error during parsing or conversion:");
            for issue in &v.issues {
                let path = if issue.path.is_empty() { "root" } else { &issue.path };
                eprintln!("- Path: {} | Message: {}", path, issue.message);
            }
        }
        _ => eprintln!("Error processing service input: {}", err),
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; keep stdout clean for JSON
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    ).init();

    let args = Args::parse();
    let config = Config::default().with_dirs(args.init_dirs, args.runit_dirs);

    let result = match args.command {
        Command::Convert { path, format, compact } => {
            commands::convert(&path, format.as_deref(), compact, &config)
        }
        Command::Classify { path } => commands::classify(&path, &config),
        Command::Parse { path, format } => commands::parse(&path, format.as_deref(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(e.as_ref());
            ExitCode::FAILURE
        }
    }
}
