// tests/config_load.rs
//
// Config file + env resolution and extra profile files merged over the built-ins.

use std::{env, fs, path::PathBuf};

use serial_test::serial;
use voice_sentiment_analyzer::{
    config::app::{ENV_CONFIG_PATH, ENV_DEFAULT_LANG, ENV_HISTORY_CAP, ENV_PROFILES_PATH},
    AnalysisSession, AppConfig, Polarity,
};

/// Create a unique temporary directory in std::env::temp_dir().
fn unique_tmp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = env::temp_dir().join(format!("vsa-{tag}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn clear_env() {
    for k in [ENV_CONFIG_PATH, ENV_DEFAULT_LANG, ENV_HISTORY_CAP, ENV_PROFILES_PATH] {
        env::remove_var(k);
    }
}

const EXTRA_PROFILES: &str = r#"{
  "profiles": [
    {
      "id": "it",
      "locale": "it-IT",
      "lexicon": { "buono": 2, "cattivo": -2, "amore": 3 },
      "negations": ["non"],
      "intensifiers": { "molto": 1.5 },
      "labels": { "positive": "Positivo", "negative": "Negativo", "neutral": "Neutro" },
      "messages": { "speech": "Penso che sia {label} con il {confidence} per cento di fiducia." }
    }
  ]
}"#;

#[test]
#[serial]
fn file_then_env_overrides() {
    clear_env();
    let dir = unique_tmp_dir("cfg");
    let path = dir.join("app.toml");
    fs::write(&path, "default_language = \"de\"\nhistory_capacity = 3\n").unwrap();

    env::set_var(ENV_CONFIG_PATH, path.display().to_string());
    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg.default_language, "de");
    assert_eq!(cfg.history_capacity, 3);

    env::set_var(ENV_HISTORY_CAP, "9");
    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg.history_capacity, 9);

    clear_env();
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn missing_explicit_config_is_an_error() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "/definitely/not/here/app.toml");
    assert!(AppConfig::load().is_err());
    clear_env();
}

#[test]
#[serial]
fn extra_profiles_add_a_language_without_code_changes() {
    clear_env();
    let dir = unique_tmp_dir("profiles");
    let path = dir.join("extra.json");
    fs::write(&path, EXTRA_PROFILES).unwrap();

    env::set_var(ENV_PROFILES_PATH, path.display().to_string());
    let cfg = AppConfig::load().unwrap();
    let session = AnalysisSession::from_config(&cfg).unwrap();

    assert!(session.registry().contains("it"));
    assert!(session.registry().contains("en"));

    let r = session.analyze("Non è buono", "it").unwrap();
    assert_eq!(r.polarity, Polarity::Negative);
    assert_eq!(r.label, "Negativo");

    let u = session.latest_utterance("it");
    assert_eq!(u.locale, "it-IT");
    assert!(u.message.starts_with("Penso che sia Negativo"));

    clear_env();
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn broken_profiles_file_fails_startup() {
    clear_env();
    let dir = unique_tmp_dir("broken");
    let path = dir.join("extra.json");
    fs::write(&path, "{ not json").unwrap();

    let cfg = AppConfig {
        profiles_path: Some(path),
        ..AppConfig::default()
    };
    assert!(AnalysisSession::from_config(&cfg).is_err());

    let _ = fs::remove_dir_all(&dir);
}
