// src/config/app.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::history::DEFAULT_HISTORY_CAP;
use crate::pipeline::DEFAULT_CHANNEL_CAPACITY;
use crate::registry::DEFAULT_LANGUAGE;

pub const DEFAULT_APP_CONFIG_PATH: &str = "config/app.toml";

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_DEFAULT_LANG: &str = "SENTIMENT_DEFAULT_LANG";
pub const ENV_HISTORY_CAP: &str = "SENTIMENT_HISTORY_CAP";
pub const ENV_PROFILES_PATH: &str = "SENTIMENT_PROFILES_PATH";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAP
}
fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Fallback profile for unknown language ids.
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Extra profiles JSON merged over the built-ins.
    #[serde(default)]
    pub profiles_path: Option<PathBuf>,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            history_capacity: default_history_capacity(),
            profiles_path: None,
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(s).context("parsing app config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading app config from {}", path.display()))?;
        Self::from_toml_str(&data)
            .with_context(|| format!("invalid app config at {}", path.display()))
    }

    /// $SENTIMENT_CONFIG_PATH, else `config/app.toml` if present, else defaults;
    /// then env overrides.
    pub fn load() -> Result<Self> {
        let cfg = match env::var(ENV_CONFIG_PATH) {
            Ok(p) => Self::load_from_file(PathBuf::from(p))?,
            Err(_) => {
                let p = PathBuf::from(DEFAULT_APP_CONFIG_PATH);
                if p.exists() {
                    Self::load_from_file(&p)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(lang) = env::var(ENV_DEFAULT_LANG) {
            let lang = lang.trim();
            if !lang.is_empty() {
                self.default_language = lang.to_string();
            }
        }
        if let Ok(raw) = env::var(ENV_HISTORY_CAP) {
            self.history_capacity = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_HISTORY_CAP} must be a positive integer"))?;
        }
        if let Ok(p) = env::var(ENV_PROFILES_PATH) {
            if !p.trim().is_empty() {
                self.profiles_path = Some(PathBuf::from(p));
            }
        }
        Ok(self.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.history_capacity = self.history_capacity.max(1);
        self.channel_capacity = self.channel_capacity.max(1);
        if self.default_language.trim().is_empty() {
            self.default_language = default_language();
        }
        self
    }
}
