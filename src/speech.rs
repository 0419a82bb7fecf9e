//! Spoken-message templates and the speech collaborator boundary.
//!
//! The crate never synthesizes audio; it builds the localized message and the
//! locale code, and hands both to a [`SpeechSink`].

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::profile::LanguageProfile;
use crate::telemetry::anon_hash;

/// Message plus the locale a synthesizer should use for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub message: String,
    pub locale: String,
}

impl Utterance {
    pub fn new(message: impl Into<String>, profile: &LanguageProfile) -> Self {
        Self {
            message: message.into(),
            locale: profile.locale.clone(),
        }
    }
}

/// Fill the profile's speech template. Confidence is rounded to the nearest integer.
pub fn speak_template(label: &str, confidence: f64, profile: &LanguageProfile) -> String {
    let pct = confidence.round() as i64;
    profile
        .messages
        .speech
        .replace("{label}", label)
        .replace("{confidence}", &pct.to_string())
}

/// Prompt shown or spoken when the input was empty.
pub fn empty_prompt(profile: &LanguageProfile) -> &str {
    &profile.messages.empty_input
}

/// Prompt spoken when asked to repeat a result before any analysis.
pub fn no_result_prompt(profile: &LanguageProfile) -> &str {
    &profile.messages.no_result
}

/// External text-to-speech collaborator. Failures are reported, never fatal.
#[async_trait]
pub trait SpeechSink: Send + Sync {
    async fn speak(&self, utterance: &Utterance) -> anyhow::Result<()>;
}

/// Sink that only logs what would be spoken (hashed, with locale).
#[derive(Debug, Clone, Default)]
pub struct TracingSpeechSink;

#[async_trait]
impl SpeechSink for TracingSpeechSink {
    async fn speak(&self, utterance: &Utterance) -> anyhow::Result<()> {
        info!(
            target: "speech",
            id = %anon_hash(&utterance.message),
            locale = %utterance.locale,
            "utterance"
        );
        Ok(())
    }
}
