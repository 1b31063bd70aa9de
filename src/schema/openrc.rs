//! OpenRC init script record

use serde::Serialize;

use super::{EnvVars, Validate, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRcServiceConfig {
    /// `name=` value, or the script's file name
    pub service_name: String,
    pub description: Option<String>,
    pub command: Option<String>,
    #[serde(rename = "command_args")]
    pub command_args: Option<String>,
    #[serde(rename = "start_stop_daemon_args")]
    pub start_stop_daemon_args: Option<String>,
    pub pidfile: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    /// `None` rather than an empty list
    pub depend: Option<Vec<String>>,
    pub environment: EnvVars,
}

impl Validate for OpenRcServiceConfig {
    fn check(&self, v: &mut Validator) {
        v.non_empty(
            "serviceName",
            &self.service_name,
            "OpenRC service name is required.",
        );
    }
}
