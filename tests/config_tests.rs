use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use titans_schedule_lambda_rust::config::{Config, DEFAULT_GAMES_URL, DEFAULT_GRAPH_URL, DEFAULT_LOGIN_URL};
use titans_schedule_lambda_rust::error::ScheduleError;

fn required() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("SPORDLE_PASS", "hunter2"),
        ("FACEBOOK_PAGE_ID", "4242"),
        ("FACEBOOK_ACCESS_TOKEN", "secret-token"),
    ])
}

fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, ScheduleError> {
    Config::from_lookup(|name| vars.get(name).map(|value| value.to_string()))
}

#[test]
fn applies_defaults() {
    let config = load(&required()).unwrap();
    assert_eq!(config.spordle.login_url, DEFAULT_LOGIN_URL);
    assert_eq!(config.spordle.games_url, DEFAULT_GAMES_URL);
    assert_eq!(config.facebook.graph_url, DEFAULT_GRAPH_URL);
    assert_eq!(config.date_offset, 0);
    assert_eq!(config.sponsor_dir, PathBuf::from("Commanditaire"));
    assert_eq!(config.artifact_dir, PathBuf::from("temp"));
    assert!(config.browser.headless);
    assert_eq!(config.browser.chrome_path, None);
    assert_eq!(config.browser.settle_timeout, Duration::from_secs(10));
    assert_eq!(config.browser.login_timeout, Duration::from_secs(15));
}

#[test]
fn reads_overrides() {
    let mut vars = required();
    vars.extend([
        ("DATE_OFFSET", " -1 "),
        ("FACEBOOK_GRAPH_URL", "https://graph.example.invalid/v1/"),
        ("CHROME_HEADLESS", "false"),
        ("CHROME_PATH", "/opt/chrome/chrome"),
        ("PAGE_SETTLE_SECS", "3"),
        ("SPONSOR_DIR", "/var/task/sponsors"),
    ]);
    let config = load(&vars).unwrap();
    assert_eq!(config.date_offset, -1);
    assert_eq!(config.facebook.graph_url, "https://graph.example.invalid/v1");
    assert!(!config.browser.headless);
    assert_eq!(config.browser.chrome_path, Some(PathBuf::from("/opt/chrome/chrome")));
    assert_eq!(config.browser.settle_timeout, Duration::from_secs(3));
    assert_eq!(config.sponsor_dir, PathBuf::from("/var/task/sponsors"));
}

#[test]
fn missing_or_blank_secret_is_an_error() {
    let mut vars = required();
    vars.remove("SPORDLE_PASS");
    assert!(matches!(load(&vars), Err(ScheduleError::MissingEnv("SPORDLE_PASS"))));

    vars.insert("SPORDLE_PASS", "hunter2");
    vars.insert("FACEBOOK_ACCESS_TOKEN", "   ");
    assert!(matches!(load(&vars), Err(ScheduleError::MissingEnv("FACEBOOK_ACCESS_TOKEN"))));
}

#[test]
fn rejects_unparseable_numbers() {
    let mut vars = required();
    vars.insert("DATE_OFFSET", "tomorrow");
    match load(&vars) {
        Err(ScheduleError::InvalidEnv { name, value }) => {
            assert_eq!(name, "DATE_OFFSET");
            assert_eq!(value, "tomorrow");
        }
        other => panic!("expected InvalidEnv, got {other:?}"),
    }
}

#[test]
fn debug_redacts_secrets() {
    let config = load(&required()).unwrap();
    let dbg = format!("{config:?}");
    assert!(!dbg.contains("hunter2"));
    assert!(!dbg.contains("secret-token"));
    assert!(dbg.contains("<redacted>"));
    assert!(dbg.contains("4242"));
}
