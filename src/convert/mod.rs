//! Format record → unified record
//!
//! Converters take an already validated record and never look at raw text,
//! except the runit converter, which has to pick the primary command out of
//! the stored `run` script. Every result is checked against the unified
//! schema before it is returned.

mod openrc;
mod runit;
mod systemd;

pub use openrc::convert_openrc;
pub use runit::{convert_runit, RUNIT_NOTES};
pub use systemd::convert_systemd;
