//! svcnorm - normalize init system service definitions
//!
//! Reads a service definition from one of three init systems and produces a
//! single format-agnostic record:
//! - systemd `.service` unit files
//! - OpenRC init scripts (`/etc/init.d/*`)
//! - runit service directories (a directory with a `run` script)
//!
//! # Architecture
//!
//! ```text
//! path ──▶ classify ──▶ parsers ──▶ ServiceInput ──▶ convert ──▶ GlobalService
//!                          │                            │
//!                          └──── schema (validation) ───┘
//! ```
//!
//! Nothing here starts or supervises services; files are only read.

pub mod classify;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod parsers;
pub mod schema;

pub use classify::{classify, ServiceFormat};
pub use config::Config;
pub use dispatch::{convert_service, load_service_input, load_service_input_as, normalize, ServiceInput};
pub use error::{Error, Result};
pub use schema::{FieldIssue, GlobalService, ValidationError};
