//! Caller-owned analysis context: the read-only profile registry plus the
//! bounded history of recent results. Cheap to clone (shared `Arc`s).

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::confidence::AnalysisResult;
use crate::engine::{analyze_text, EmptyInput};
use crate::history::History;
use crate::profile::LanguageProfile;
use crate::registry::ProfileRegistry;
use crate::speech::{no_result_prompt, speak_template, Utterance};

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    registry: Arc<ProfileRegistry>,
    history: Arc<History>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(ProfileRegistry::builtin(), History::default())
    }
}

impl AnalysisSession {
    pub fn new(registry: Arc<ProfileRegistry>, history: History) -> Self {
        Self {
            registry,
            history: Arc::new(history),
        }
    }

    /// Registry (built-ins plus optional extra profiles) and history sized from `cfg`.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let registry = match &cfg.profiles_path {
            Some(p) => ProfileRegistry::builtin_with_extra(p)?,
            None => (*ProfileRegistry::builtin()).clone(),
        }
        .with_default(&cfg.default_language);

        info!(
            target: "session",
            default_lang = %registry.default_profile().id,
            languages = registry.languages().len(),
            history_cap = cfg.history_capacity,
            "analysis session ready"
        );
        Ok(Self::new(
            Arc::new(registry),
            History::with_capacity(cfg.history_capacity),
        ))
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn profile(&self, language_id: &str) -> &LanguageProfile {
        self.registry.resolve(language_id)
    }

    /// Analyze and record the result. Empty input is not recorded.
    pub fn analyze(&self, raw_text: &str, language_id: &str) -> Result<AnalysisResult, EmptyInput> {
        let profile = self.registry.resolve(language_id);
        let result = analyze_text(raw_text, profile)?;
        self.history.record(raw_text, &result);
        Ok(result)
    }

    /// What to say when asked to repeat the latest result in `language_id`.
    pub fn latest_utterance(&self, language_id: &str) -> Utterance {
        let profile = self.registry.resolve(language_id);
        match self.history.latest() {
            Some(e) => Utterance::new(speak_template(&e.label, e.confidence, profile), profile),
            None => Utterance::new(no_result_prompt(profile), profile),
        }
    }
}
