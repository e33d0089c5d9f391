use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use super::*;

#[test]
fn defaults_fall_back_to_public_placeholders() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "https://latexlite.com/");
    assert_eq!(settings.api.api_key, DEMO_API_KEY);
    assert!(settings.api.uses_demo_key());
    assert_eq!(settings.api.request_timeout, Duration::from_secs(60));
    assert_eq!(settings.api.poll_interval, Duration::from_secs(2));
    assert_eq!(settings.api.wait_timeout, Duration::from_secs(60));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("https://staging.latexlite.com".to_string());
    raw.api.poll_interval_seconds = Some(5);
    raw.logging.level = Some("info".to_string());

    let overrides = Overrides {
        base_url: Some("http://localhost:8080".to_string()),
        poll_interval_seconds: Some(1),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides).expect("overrides");
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://localhost:8080/");
    assert_eq!(settings.api.poll_interval, Duration::from_secs(1));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn empty_values_count_as_unset() {
    let mut raw = RawSettings::default();
    raw.api.api_key = Some("   ".to_string());

    let overrides = Overrides {
        base_url: Some(String::new()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides).expect("overrides");
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "https://latexlite.com/");
    assert_eq!(settings.api.api_key, DEMO_API_KEY);
}

#[test]
fn key_file_wins_over_inline_key() {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(b"file-key\n").expect("write key");

    let mut raw = RawSettings::default();
    let overrides = Overrides {
        api_key: Some("env-key".to_string()),
        key_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides).expect("overrides");
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.api_key, "file-key");
}

#[test]
fn missing_key_file_is_reported() {
    let mut raw = RawSettings::default();
    let overrides = Overrides {
        key_file: Some(PathBuf::from("/nonexistent/latexlite.key")),
        ..Default::default()
    };

    let err = raw.apply_overrides(&overrides).expect_err("missing file");
    assert!(matches!(err, LoadError::KeyFile { .. }));
}

#[test]
fn empty_key_file_is_rejected() {
    let file = NamedTempFile::new().expect("tmp file");

    let mut raw = RawSettings::default();
    let overrides = Overrides {
        api_key: Some("env-key".to_string()),
        key_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let err = raw.apply_overrides(&overrides).expect_err("empty key file");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "api.api_key",
            ..
        }
    ));
}

#[test]
fn zero_poll_interval_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.poll_interval_seconds = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero interval");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "api.poll_interval_seconds",
            ..
        }
    ));
}

#[test]
fn non_http_base_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://latexlite.com".to_string());

    let err = Settings::from_raw(raw).expect_err("bad scheme");
    assert!(err.to_string().contains("api.base_url"));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("bad level");
    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = Overrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides).expect("overrides");
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn config_file_is_loaded_and_overridden() {
    let file = toml_file(
        "[api]\nbase_url = \"https://render.example.com\"\nwait_timeout_seconds = 120\n\n[logging]\njson = true\n",
    );

    let overrides = Overrides {
        wait_timeout_seconds: Some(30),
        ..Default::default()
    };
    let settings = load(Some(file.path()), &overrides).expect("load");

    assert_eq!(settings.api.base_url.as_str(), "https://render.example.com/");
    assert_eq!(settings.api.wait_timeout, Duration::from_secs(30));
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn key_preview_shows_first_ten_chars() {
    let mut settings = Settings::from_raw(RawSettings::default())
        .expect("valid settings")
        .api;

    settings.api_key = "sk_live_0123456789".to_string();
    assert_eq!(settings.key_preview(), "sk_live_01");

    settings.api_key = "short".to_string();
    assert_eq!(settings.key_preview(), "short");
}

#[test]
#[serial]
fn environment_beats_file_and_cli_beats_environment() {
    let file = toml_file(
        "[api]\nbase_url = \"https://render.example.com\"\nwait_timeout_seconds = 120\n\n[logging]\nlevel = \"warn\"\n",
    );

    // SAFETY: env-mutating tests are serialized.
    unsafe {
        std::env::set_var("LATEXLITE__API__WAIT_TIMEOUT_SECONDS", "7");
        std::env::set_var("LATEXLITE__LOGGING__LEVEL", "debug");
    }
    let from_env = load(Some(file.path()), &Overrides::default());
    let from_cli = load(
        Some(file.path()),
        &Overrides {
            wait_timeout_seconds: Some(3),
            ..Default::default()
        },
    );
    // SAFETY: as above.
    unsafe {
        std::env::remove_var("LATEXLITE__API__WAIT_TIMEOUT_SECONDS");
        std::env::remove_var("LATEXLITE__LOGGING__LEVEL");
    }

    let settings = from_env.expect("load");
    assert_eq!(settings.api.base_url.as_str(), "https://render.example.com/");
    assert_eq!(settings.api.wait_timeout, Duration::from_secs(7));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);

    let settings = from_cli.expect("load");
    assert_eq!(settings.api.wait_timeout, Duration::from_secs(3));
}
