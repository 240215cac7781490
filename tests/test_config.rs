use std::net::Ipv4Addr;

use docroot::config::{CONFIG_ENV, Config, ConfigError, DEFAULT_READ_BUFFER_SIZE};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_config_from_args() {
    let root = tempfile::tempdir().unwrap();
    let root_arg = format!("-webRoot={}", root.path().display());

    let cfg = Config::from_args(args(&[&root_arg, "-webIP=127.0.0.1", "-webPort=8080"])).unwrap();

    assert_eq!(cfg.server.address, "127.0.0.1");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.web_root, root.path());
    assert_eq!(cfg.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
    assert_eq!(cfg.server.bind_ip().unwrap(), Ipv4Addr::LOCALHOST);
}

#[test]
fn test_config_args_in_any_order() {
    let root = tempfile::tempdir().unwrap();
    let root_arg = format!("-webRoot={}", root.path().display());

    let cfg = Config::from_args(args(&["-webPort=80", &root_arg, "-webIP=10.0.0.1"])).unwrap();

    assert_eq!(cfg.server.port, 80);
    assert_eq!(cfg.server.address, "10.0.0.1");
}

#[test]
fn test_config_wrong_argument_count() {
    let err = Config::from_args(args(&["-webIP=127.0.0.1"])).unwrap_err();
    assert!(matches!(err, ConfigError::ArgumentCount(1)));

    let err = Config::from_args(Vec::new()).unwrap_err();
    assert!(matches!(err, ConfigError::ArgumentCount(0)));
}

#[test]
fn test_config_unknown_or_repeated_argument() {
    let err = Config::from_args(args(&["-root=/tmp", "-webIP=127.0.0.1", "-webPort=1"])).unwrap_err();
    assert!(matches!(err, ConfigError::UnexpectedArgument(ref a) if a == "-root=/tmp"));

    let err = Config::from_args(args(&["-webIP=1.1.1.1", "-webIP=127.0.0.1", "-webPort=1"])).unwrap_err();
    assert!(matches!(err, ConfigError::UnexpectedArgument(_)));
}

#[test]
fn test_config_invalid_values() {
    let root = tempfile::tempdir().unwrap();
    let root_arg = format!("-webRoot={}", root.path().display());

    let err = Config::from_args(args(&[&root_arg, "-webIP=127.0.0.1", "-webPort=70000"])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "70000"));

    let err = Config::from_args(args(&[&root_arg, "-webIP=300.0.0.1", "-webPort=80"])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAddress(_)));

    let missing = root.path().join("nope");
    let missing_arg = format!("-webRoot={}", missing.display());
    let err = Config::from_args(args(&[&missing_arg, "-webIP=127.0.0.1", "-webPort=80"])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWebRoot(_)));
}

#[test]
fn test_config_from_yaml() {
    let root = tempfile::tempdir().unwrap();
    let yaml = format!(
        "server:\n  address: 127.0.0.1\n  port: 9000\n  web_root: {}\nlog:\n  path: /tmp/custom.log\nread_buffer_size: 4096\n",
        root.path().display()
    );

    let cfg = Config::from_yaml_str(&yaml).unwrap();

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.log.path.to_str(), Some("/tmp/custom.log"));
    assert_eq!(cfg.read_buffer_size, 4096);
}

#[test]
fn test_config_yaml_defaults() {
    let root = tempfile::tempdir().unwrap();
    let yaml = format!(
        "server:\n  address: 127.0.0.1\n  port: 9000\n  web_root: {}\n",
        root.path().display()
    );

    let cfg = Config::from_yaml_str(&yaml).unwrap();

    assert_eq!(cfg.log.path.to_str(), Some("docroot.log"));
    assert_eq!(cfg.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
}

#[test]
fn test_config_yaml_is_validated() {
    let root = tempfile::tempdir().unwrap();
    let yaml = format!(
        "server:\n  address: 127.0.0.1\n  port: 9000\n  web_root: {}\nread_buffer_size: 0\n",
        root.path().display()
    );

    assert!(matches!(Config::from_yaml_str(&yaml), Err(ConfigError::InvalidBufferSize)));
    assert!(matches!(Config::from_yaml_str("server: [1, 2]"), Err(ConfigError::Yaml(_))));
}

#[test]
fn test_config_load_prefers_env_file() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("docroot.yaml");
    std::fs::write(
        &file,
        format!(
            "server:\n  address: 0.0.0.0\n  port: 5000\n  web_root: {}\n",
            root.path().display()
        ),
    )
    .unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &file);
    }
    let cfg = Config::load(args(&["ignored"]));
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    let cfg = cfg.unwrap();
    assert_eq!(cfg.server.address, "0.0.0.0");
    assert_eq!(cfg.server.port, 5000);
}
