use std::time::{SystemTime, UNIX_EPOCH};

use spotlight_core::config::{load, save, validate, Config, ConfigError};

fn temp_config_path(label: &str) -> std::path::PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join("spotlight")
        .join(format!("{label}-{unique}.toml"))
}

#[test]
fn rejects_history_limit_out_of_range() {
    let cfg = Config {
        max_history_results: 0,
        ..Default::default()
    };
    assert!(validate(&cfg).is_err());
}

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.max_history_results, 20);
    assert!(cfg.settings_path.to_string_lossy().contains("spotlight"));
    assert!(cfg.config_path.to_string_lossy().contains("spotlight"));
    assert!(validate(&cfg).is_ok());
}

#[test]
fn missing_file_loads_defaults_at_requested_path() {
    let path = temp_config_path("missing");
    let cfg = load(Some(path.as_path())).unwrap();
    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.max_history_results, Config::default().max_history_results);
}

#[test]
fn saves_and_reloads_toml() {
    let path = temp_config_path("roundtrip");
    let cfg = Config {
        max_history_results: 7,
        config_path: path.clone(),
        ..Default::default()
    };
    save(&cfg).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("max_history_results = 7"));

    let loaded = load(Some(path.as_path())).unwrap();
    assert_eq!(loaded, cfg);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn reports_invalid_values_from_file() {
    let path = temp_config_path("invalid");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "max_history_results = 0\n").unwrap();

    assert!(matches!(load(Some(path.as_path())), Err(ConfigError::Invalid(_))));

    std::fs::write(&path, "max_history_results = [").unwrap();
    assert!(matches!(load(Some(path.as_path())), Err(ConfigError::Parse(_))));

    std::fs::remove_file(&path).unwrap();
}
