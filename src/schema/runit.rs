//! runit service directory record

use serde::Serialize;

use super::{EnvVars, Validate, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunitServiceConfig {
    /// Name of the service directory
    pub service_name: String,
    /// Full text of `run`; interpreted, never executed
    pub run_script_content: String,
    /// Full text of `log/run`, kept for reference only
    pub log_run_script_content: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    pub environment: EnvVars,
    /// Services named by `sv start`/`sv check` lines
    pub dependencies: Vec<String>,
}

impl Validate for RunitServiceConfig {
    fn check(&self, v: &mut Validator) {
        v.non_empty(
            "serviceName",
            &self.service_name,
            "Runit service name is required.",
        );
        v.non_empty(
            "runScriptContent",
            &self.run_script_content,
            "Runit `run` script content is required.",
        );
    }
}
