use std::sync::Mutex;

use tempfile::NamedTempFile;

use crowd_zones::config::ZoneConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "ZONES_CONFIG",
        "ZONES_CLOSURE_RADIUS",
        "ZONES_MIN_AREA",
        "ZONES_NAME_PREFIX",
        "ZONES_HIGH_RATIO",
        "ZONES_DEFAULT_THRESHOLD",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_defaults_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = ZoneConfig::load().expect("load config");
    assert_eq!(cfg, ZoneConfig::default());
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "drawing": {
            "closure_radius": 12.5,
            "name_prefix": "Area"
        },
        "validation": {
            "min_area": 400.0
        },
        "alerts": {
            "high_severity_ratio": 2.0,
            "default_threshold": 25
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("ZONES_CONFIG", file.path());
    std::env::set_var("ZONES_MIN_AREA", "50");
    std::env::set_var("ZONES_DEFAULT_THRESHOLD", "8");

    let cfg = ZoneConfig::load().expect("load config");

    assert_eq!(cfg.closure_radius, 12.5);
    assert_eq!(cfg.name_prefix, "Area");
    assert_eq!(cfg.min_area, 50.0);
    assert_eq!(cfg.high_severity_ratio, 2.0);
    assert_eq!(cfg.default_threshold, 8);

    clear_env();
}

#[test]
fn rejects_bad_env_and_bad_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("ZONES_CLOSURE_RADIUS", "wide");
    let err = ZoneConfig::load().unwrap_err();
    assert!(err.to_string().contains("ZONES_CLOSURE_RADIUS"));

    std::env::set_var("ZONES_CLOSURE_RADIUS", "-3");
    assert!(ZoneConfig::load().is_err());

    clear_env();
    std::env::set_var("ZONES_HIGH_RATIO", "0.9");
    assert!(ZoneConfig::load().is_err());

    clear_env();
}

#[test]
fn missing_or_malformed_file_names_the_path() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    std::io::Write::write_all(&mut file, b"{ not json").expect("write config");
    let err = ZoneConfig::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("invalid config file"));

    let missing = file.path().with_extension("missing");
    let err = ZoneConfig::load_from(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));

    clear_env();
}
