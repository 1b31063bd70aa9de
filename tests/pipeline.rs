//! End-to-end tests: files on disk through classification, parsing and conversion

use std::fs;
use std::path::{Path, PathBuf};

use svcnorm::{Config, Error, ServiceFormat, ServiceInput};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Config whose OpenRC and runit directories live inside `root`
fn config_for(root: &TempDir) -> (Config, PathBuf, PathBuf) {
    let init_dir = root.path().join("etc/init.d");
    let sv_dir = root.path().join("etc/sv");
    fs::create_dir_all(&init_dir).unwrap();
    fs::create_dir_all(&sv_dir).unwrap();
    let config = Config::default().with_dirs(vec![init_dir.clone()], vec![sv_dir.clone()]);
    (config, init_dir, sv_dir)
}

#[test]
fn test_systemd_unit_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let path = root.path().join("docker.service");
    write(
        &path,
        r#"
[Unit]
Description=Docker Application Container Engine
Documentation=https://docs.docker.com
After=network-online.target docker.socket firewalld.service
Wants=network-online.target
Requires=docker.socket

[Service]
Type=notify
ExecStart=/usr/bin/dockerd -H fd://
ExecReload=/bin/kill -s HUP $MAINPID
Environment=DOCKER_OPTS= LANG=C
TimeoutStartSec=0
Restart=always

[Install]
WantedBy=multi-user.target
"#,
    );

    let svc = svcnorm::normalize(&path, &Config::default()).unwrap();
    let json = serde_json::to_value(&svc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "docker",
            "description": "Docker Application Container Engine",
            "exec": "/usr/bin/dockerd -H fd://",
            "startCommand": "/usr/bin/dockerd -H fd://",
            "restartCommand": "/bin/kill -s HUP $MAINPID",
            "environment": ["DOCKER_OPTS=", "LANG=C"],
            "dependencies": ["network-online.target", "docker.socket", "firewalld.service"],
            "autoStart": true,
            "notes": "Converted from Systemd (Type: notify). PIDFile: N/A",
        })
    );
}

#[test]
fn test_systemd_missing_exec_start_names_field() {
    let root = tempfile::tempdir().unwrap();
    let path = root.path().join("broken.service");
    write(&path, "[Unit]\nDescription=Nothing to run\n");

    let Err(Error::FieldValidation(v)) = svcnorm::normalize(&path, &Config::default()) else {
        panic!("expected validation error");
    };
    assert_eq!(v.issues.len(), 1);
    assert_eq!(v.issues[0].path, "service.ExecStart");
}

#[test]
fn test_openrc_script_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let (config, init_dir, _) = config_for(&root);
    let path = init_dir.join("nginx");
    write(
        &path,
        r#"#!/sbin/openrc-run
# Nginx web server

command="/usr/sbin/nginx"
command_args="-c /etc/nginx/nginx.conf"
pidfile="/run/nginx.pid"
export NGINX_ENV=production

depend() {
	need net
	use dns logger
}
"#,
    );

    assert_eq!(svcnorm::classify(&path, &config).unwrap(), ServiceFormat::OpenRc);
    let svc = svcnorm::normalize(&path, &config).unwrap();
    assert_eq!(svc.name, "nginx");
    assert_eq!(svc.description.as_deref(), Some("Nginx web server"));
    assert_eq!(svc.exec, "/usr/sbin/nginx -c /etc/nginx/nginx.conf");
    assert_eq!(svc.environment, Some(vec!["NGINX_ENV=production".to_string()]));
    assert_eq!(
        svc.dependencies,
        Some(vec!["net".to_string(), "dns".to_string(), "logger".to_string()])
    );
    assert!(svc.auto_start);
    assert_eq!(svc.notes.as_deref(), Some("Converted from OpenRC. PIDFile: /run/nginx.pid."));
}

#[test]
fn test_openrc_without_command_fails() {
    let root = tempfile::tempdir().unwrap();
    let (config, init_dir, _) = config_for(&root);
    let path = init_dir.join("empty");
    write(&path, "#!/sbin/openrc-run\nname=\"empty\"\n");

    let err = svcnorm::normalize(&path, &config).unwrap_err();
    assert!(matches!(err, Error::FieldValidation(_)));
}

#[test]
fn test_runit_directory_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let (config, _, sv_dir) = config_for(&root);
    let svc_dir = sv_dir.join("redis");
    write(
        &svc_dir.join("run"),
        r#"#!/bin/sh
export REDIS_PORT=6379
sv start network || exit 1
exec 2>&1
exec chpst -u redis:redis /usr/bin/redis-server /etc/redis.conf
"#,
    );
    write(&svc_dir.join("log/run"), "#!/bin/sh\nexec svlogd -tt ./main\n");

    let input = svcnorm::load_service_input(&svc_dir, &config).unwrap();
    let ServiceInput::Runit { config: record } = &input else {
        panic!("expected runit input");
    };
    assert!(record.log_run_script_content.is_some());

    let svc = svcnorm::convert_service(&input).unwrap();
    assert_eq!(svc.name, "redis");
    assert_eq!(svc.exec, "chpst -u redis:redis /usr/bin/redis-server /etc/redis.conf");
    assert_eq!(svc.user.as_deref(), Some("redis"));
    assert_eq!(svc.group.as_deref(), Some("redis"));
    assert_eq!(svc.environment, Some(vec!["REDIS_PORT=6379".to_string()]));
    assert_eq!(svc.dependencies, Some(vec!["network".to_string()]));
    assert!(svc.auto_start);
}

#[test]
fn test_runit_chpst_primary_line() {
    let root = tempfile::tempdir().unwrap();
    let svc_dir = root.path().join("anywhere/foo");
    write(&svc_dir.join("run"), "#!/bin/sh\nchpst -u svc -g svc /bin/foo\n");

    // No location hint needed once `run` exists
    let svc = svcnorm::normalize(&svc_dir, &Config::default()).unwrap();
    assert_eq!(svc.exec, "/bin/foo");
    assert_eq!(svc.user.as_deref(), Some("svc"));
    assert_eq!(svc.group.as_deref(), Some("svc"));
}

#[test]
fn test_runit_missing_run_script_never_partial() {
    let root = tempfile::tempdir().unwrap();
    let (config, _, sv_dir) = config_for(&root);
    let svc_dir = sv_dir.join("ghost");
    fs::create_dir_all(svc_dir.join("log")).unwrap();

    let err = svcnorm::load_service_input_as(&svc_dir, ServiceFormat::Runit, &config).unwrap_err();
    assert!(matches!(err, Error::MissingRunScript(_)));
    assert!(err.to_string().contains("does not contain a 'run' script"));
}

#[test]
fn test_unrecognized_path_lists_conventions() {
    let root = tempfile::tempdir().unwrap();
    let path = root.path().join("README");
    write(&path, "not a service");

    let err = svcnorm::normalize(&path, &Config::default()).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedFormat { .. }));
    let msg = err.to_string();
    assert!(msg.contains(".service"));
    assert!(msg.contains("/etc/init.d/"));
    assert!(msg.contains("'run' script"));
}

#[test]
fn test_missing_path() {
    let err = svcnorm::normalize(Path::new("/nonexistent/svcnorm/x"), &Config::default())
        .unwrap_err();
    assert!(matches!(err, Error::PathNotFound(_)));
}

#[test]
fn test_conversion_idempotent_across_formats() {
    let root = tempfile::tempdir().unwrap();
    let (config, init_dir, sv_dir) = config_for(&root);
    let unit = root.path().join("a.service");
    write(&unit, "[Service]\nExecStart=/bin/a\nEnvironment=X=1\n");
    let script = init_dir.join("b");
    write(&script, "command=/bin/b\nexport Y=2\n");
    let dir = sv_dir.join("c");
    write(&dir.join("run"), "export Z=3\nexec /bin/c\n");

    for path in [unit, script, dir] {
        let input = svcnorm::load_service_input(&path, &config).unwrap();
        let first = serde_json::to_string(&svcnorm::convert_service(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&svcnorm::convert_service(&input).unwrap()).unwrap();
        assert_eq!(first, second, "{}", path.display());
    }
}

#[test]
fn test_unknown_format_tag() {
    let err = "upstart".parse::<ServiceFormat>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedServiceType(_)));
}
