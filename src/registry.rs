//! # Profile Registry
//! Keyed, read-only map from language id to [`LanguageProfile`].
//!
//! - Built-in profiles are embedded from `data/profiles.json` and parsed once.
//! - Extra profiles (same JSON schema) can be merged over the built-ins at startup.
//! - `resolve` never fails: unknown ids map to the default profile (English).

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path, sync::Arc};
use tracing::info;

use crate::profile::{Labels, LanguageProfile};

pub const DEFAULT_LANGUAGE: &str = "en";

static BUILTIN: Lazy<Arc<ProfileRegistry>> = Lazy::new(|| {
    let raw = include_str!("../data/profiles.json");
    Arc::new(ProfileRegistry::from_json_str(raw).expect("valid built-in profiles"))
});

/// On-disk shape of a profiles file.
#[derive(Debug, Deserialize)]
struct ProfilesFile {
    #[serde(default)]
    default: Option<String>,
    profiles: Vec<LanguageProfile>,
}

/// Summary row for language pickers and speech collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageInfo {
    pub id: String,
    pub locale: String,
    pub labels: Labels,
}

#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, LanguageProfile>,
    default_id: String,
}

impl ProfileRegistry {
    /// Shared handle to the embedded profiles.
    pub fn builtin() -> Arc<ProfileRegistry> {
        BUILTIN.clone()
    }

    /// Parse a profiles document. The default id must name one of its profiles.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let file: ProfilesFile = serde_json::from_str(s).context("parsing profiles json")?;
        let mut profiles = BTreeMap::new();
        for p in file.profiles {
            let p = p.normalized();
            if p.id.is_empty() {
                return Err(anyhow!("profile with empty id"));
            }
            profiles.insert(p.id.clone(), p);
        }

        let default_id = file
            .default
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        if !profiles.contains_key(&default_id) {
            return Err(anyhow!("default profile `{default_id}` is not defined"));
        }

        Ok(Self {
            profiles,
            default_id,
        })
    }

    /// Built-ins plus the profiles found in `path` (file entries win on id clash).
    pub fn builtin_with_extra<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading extra profiles from {}", path.display()))?;
        let file: ProfilesFile = serde_json::from_str(&content)
            .with_context(|| format!("parsing extra profiles in {}", path.display()))?;

        let mut reg = (*Self::builtin()).clone();
        for p in file.profiles {
            let p = p.normalized();
            if p.id.is_empty() {
                return Err(anyhow!("profile with empty id in {}", path.display()));
            }
            info!(target: "registry", lang = %p.id, "extra profile loaded");
            reg.profiles.insert(p.id.clone(), p);
        }
        Ok(reg)
    }

    /// Switch the fallback profile. Unknown ids leave the registry unchanged.
    pub fn with_default(mut self, id: &str) -> Self {
        if self.profiles.contains_key(id) {
            self.default_id = id.to_string();
        }
        self
    }

    /// Exact-id lookup with silent fallback to the default profile.
    pub fn resolve(&self, id: &str) -> &LanguageProfile {
        self.profiles
            .get(id)
            .unwrap_or_else(|| &self.profiles[&self.default_id])
    }

    pub fn get(&self, id: &str) -> Option<&LanguageProfile> {
        self.profiles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    pub fn default_profile(&self) -> &LanguageProfile {
        &self.profiles[&self.default_id]
    }

    /// Languages in id order.
    pub fn languages(&self) -> Vec<LanguageInfo> {
        self.profiles
            .values()
            .map(|p| LanguageInfo {
                id: p.id.clone(),
                locale: p.locale.clone(),
                labels: p.labels.clone(),
            })
            .collect()
    }
}
