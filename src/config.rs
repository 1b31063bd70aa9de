//! Filesystem conventions used to recognize each format

use std::path::{Path, PathBuf};

/// Where each init system keeps its service definitions
#[derive(Debug, Clone)]
pub struct Config {
    /// File name suffixes of systemd units (e.g. ".service")
    pub unit_suffixes: Vec<String>,
    /// Directories holding OpenRC init scripts
    pub init_script_dirs: Vec<PathBuf>,
    /// Usual homes of runit service directories (a hint only)
    pub runit_service_dirs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_suffixes: vec![".service".to_string()],
            init_script_dirs: vec![PathBuf::from("/etc/init.d")],
            runit_service_dirs: vec![
                PathBuf::from("/etc/service"),
                PathBuf::from("/var/service"),
                PathBuf::from("/etc/sv"),
                PathBuf::from("/service"),
                PathBuf::from("/etc/runit/runsvdir"),
            ],
        }
    }
}

impl Config {
    /// Add extra directories on top of the defaults
    pub fn with_dirs(mut self, init_dirs: Vec<PathBuf>, runit_dirs: Vec<PathBuf>) -> Self {
        self.init_script_dirs.extend(init_dirs);
        self.runit_service_dirs.extend(runit_dirs);
        self
    }

    /// Unit suffix `file_name` ends with, if any
    pub fn unit_suffix<'a>(&'a self, file_name: &str) -> Option<&'a str> {
        self.unit_suffixes
            .iter()
            .map(String::as_str)
            .find(|suffix| file_name.len() > suffix.len() && file_name.ends_with(suffix))
    }

    pub fn is_under_init_dir(&self, path: &Path) -> bool {
        self.init_script_dirs.iter().any(|dir| path.starts_with(dir))
    }

    pub fn is_under_runit_dir(&self, path: &Path) -> bool {
        self.runit_service_dirs.iter().any(|dir| path.starts_with(dir))
    }

    /// Human-readable list of the three supported conventions
    pub fn describe_conventions(&self) -> String {
        let suffixes = self.unit_suffixes.join(", ");
        let init_dirs = join_paths(&self.init_script_dirs);
        format!(
            "Supported:\n\
             - Systemd: Files ending with {} (e.g., /usr/lib/systemd/system/myapp.service)\n\
             - OpenRC: Files in {} (e.g., /etc/init.d/myapp)\n\
             - Runit: Directories containing a 'run' script (e.g., /etc/service/myapp/)",
            suffixes, init_dirs
        )
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}/", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_suffix() {
        let config = Config::default();
        assert_eq!(config.unit_suffix("sshd.service"), Some(".service"));
        assert_eq!(config.unit_suffix("sshd.socket"), None);
        // A bare suffix has no unit name
        assert_eq!(config.unit_suffix(".service"), None);
    }

    #[test]
    fn test_init_dir_is_component_wise() {
        let config = Config::default();
        assert!(config.is_under_init_dir(Path::new("/etc/init.d/sshd")));
        assert!(!config.is_under_init_dir(Path::new("/etc/init.dx/sshd")));
        assert!(!config.is_under_init_dir(Path::new("etc/init.d/sshd")));
    }

    #[test]
    fn test_with_dirs_extends_defaults() {
        let config = Config::default().with_dirs(
            vec![PathBuf::from("/opt/init.d")],
            vec![PathBuf::from("/opt/sv")],
        );
        assert!(config.is_under_init_dir(Path::new("/etc/init.d/a")));
        assert!(config.is_under_init_dir(Path::new("/opt/init.d/a")));
        assert!(config.is_under_runit_dir(Path::new("/opt/sv/a")));
    }

    #[test]
    fn test_describe_conventions_lists_all_formats() {
        let text = Config::default().describe_conventions();
        assert!(text.contains("Systemd: Files ending with .service"));
        assert!(text.contains("OpenRC: Files in /etc/init.d/"));
        assert!(text.contains("Runit: Directories containing a 'run' script"));
    }
}
