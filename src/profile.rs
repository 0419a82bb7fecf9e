//! # Language Profile
//! The single record type describing one language: lexicon, negations,
//! intensifiers, display labels, locale code and localized message templates.
//!
//! Profiles are deserialized from JSON and then passed through
//! [`LanguageProfile::normalized`] so every key matches what the tokenizer emits.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::tokenizer::normalize;

/// Lexicon weights are bounded to this range.
pub const MIN_WEIGHT: i32 = -3;
pub const MAX_WEIGHT: i32 = 3;

/// Polarity of a classified text (language independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Polarity::Positive => "😊",
            Polarity::Negative => "😞",
            Polarity::Neutral => "😐",
        }
    }

    /// Display colour hint for UI consumers.
    pub fn color(self) -> &'static str {
        match self {
            Polarity::Positive => "green",
            Polarity::Negative => "red",
            Polarity::Neutral => "gray",
        }
    }
}

/// Localized display strings for the three polarities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub positive: String,
    pub negative: String,
    pub neutral: String,
}

impl Labels {
    pub fn for_polarity(&self, p: Polarity) -> &str {
        match p {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
            Polarity::Neutral => &self.neutral,
        }
    }
}

fn default_speech() -> String {
    "I think this is {label} with {confidence} percent confidence.".to_string()
}
fn default_empty_input() -> String {
    "⚠️ Please enter or speak some text!".to_string()
}
fn default_no_result() -> String {
    "Please enter or speak some text first.".to_string()
}

/// Message templates handed to display/speech collaborators.
///
/// `speech` understands the `{label}` and `{confidence}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_speech")]
    pub speech: String,
    #[serde(default = "default_empty_input")]
    pub empty_input: String,
    #[serde(default = "default_no_result")]
    pub no_result: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            speech: default_speech(),
            empty_input: default_empty_input(),
            no_result: default_no_result(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub id: String,
    /// BCP-47 locale for speech collaborators, e.g. `en-US`, `ta-IN`.
    pub locale: String,
    #[serde(default)]
    pub lexicon: HashMap<String, i32>,
    #[serde(default)]
    pub negations: HashSet<String>,
    #[serde(default)]
    pub intensifiers: HashMap<String, f64>,
    pub labels: Labels,
    #[serde(default)]
    pub messages: Messages,
}

impl LanguageProfile {
    /// Re-key every table through the tokenizer normalizer, clamp weights and
    /// drop unusable multipliers. Overlapping keys are kept (the scorer checks
    /// negation → intensifier → lexicon) but reported.
    pub fn normalized(self) -> Self {
        let lexicon: HashMap<String, i32> = self
            .lexicon
            .into_iter()
            .map(|(k, w)| (normalize(&k), w.clamp(MIN_WEIGHT, MAX_WEIGHT)))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        let negations: HashSet<String> = self
            .negations
            .iter()
            .map(|n| normalize(n))
            .filter(|n| !n.is_empty())
            .collect();

        let id = self.id.trim().to_string();
        let intensifiers: HashMap<String, f64> = self
            .intensifiers
            .into_iter()
            .filter(|(k, m)| {
                let usable = m.is_finite() && *m > 0.0;
                if !usable {
                    warn!(
                        target: "registry",
                        lang = %id,
                        key = %k,
                        multiplier = *m,
                        "intensifier dropped: multiplier must be finite and positive"
                    );
                }
                usable
            })
            .map(|(k, m)| (normalize(&k), m))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        let profile = Self {
            id,
            locale: self.locale,
            lexicon,
            negations,
            intensifiers,
            labels: self.labels,
            messages: self.messages,
        };

        let overlaps = profile.overlapping_keys();
        if !overlaps.is_empty() {
            warn!(
                target: "registry",
                lang = %profile.id,
                overlaps = ?overlaps,
                "profile keys overlap; negation > intensifier > lexicon priority applies"
            );
        }
        profile
    }

    /// Keys present in more than one table, sorted.
    pub fn overlapping_keys(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .lexicon
            .keys()
            .chain(self.intensifiers.keys())
            .filter(|k| {
                let n = self.negations.contains(*k) as u8
                    + self.intensifiers.contains_key(*k) as u8
                    + self.lexicon.contains_key(*k) as u8;
                n > 1
            })
            .cloned()
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn label(&self, p: Polarity) -> &str {
        self.labels.for_polarity(p)
    }
}
