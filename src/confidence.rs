//! # Confidence Estimator
//! Maps an aggregate score and word count to a polarity, a confidence in
//! `[0, 100]` and three non-negative chart buckets.
//!
//! Policy: `score > 1` is positive, `score < -1` is negative, anything in
//! `[-1, 1]` is neutral with a flat 50. Non-neutral confidence starts at 60
//! and grows with score density, capped at 100.

use serde::{Deserialize, Serialize};

use crate::profile::{LanguageProfile, Polarity};

pub const POSITIVE_THRESHOLD: f64 = 1.0;
pub const NEGATIVE_THRESHOLD: f64 = -1.0;
pub const NEUTRAL_CONFIDENCE: f64 = 50.0;
pub const BASE_CONFIDENCE: f64 = 60.0;
pub const DENSITY_GAIN: f64 = 40.0;

/// Magnitudes for proportional visualization, not probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Buckets {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// One chart slice: name, magnitude and fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slice {
    pub name: &'static str,
    pub value: f64,
    pub color: &'static str,
}

impl Buckets {
    pub fn from_score(total_score: f64, sentence_count: usize) -> Self {
        let positive = total_score.max(0.0);
        let negative = (-total_score).max(0.0);
        let neutral = (sentence_count as f64 - (positive + negative)).max(0.0);
        Self {
            positive,
            negative,
            neutral,
        }
    }

    /// Chart shown before any analysis.
    pub fn idle() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }

    pub fn slices(&self) -> [Slice; 3] {
        [
            Slice {
                name: "Positive",
                value: self.positive,
                color: "#16a34a",
            },
            Slice {
                name: "Negative",
                value: self.negative,
                color: "#dc2626",
            },
            Slice {
                name: "Neutral",
                value: self.neutral,
                color: "#9ca3af",
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub language: String,
    pub polarity: Polarity,
    /// Localized display label from the profile.
    pub label: String,
    /// Percentage in `[0, 100]`.
    pub confidence: f64,
    pub total_score: f64,
    pub word_count: usize,
    pub sentence_count: usize,
    pub buckets: Buckets,
}

impl AnalysisResult {
    /// Confidence with one decimal place, e.g. `"90.7"`.
    pub fn confidence_display(&self) -> String {
        format!("{:.1}", self.confidence)
    }
}

pub fn polarity_for(total_score: f64) -> Polarity {
    if total_score > POSITIVE_THRESHOLD {
        Polarity::Positive
    } else if total_score < NEGATIVE_THRESHOLD {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}

/// Confidence percentage for a score/word-count pair. Always within `[0, 100]`.
pub fn confidence_for(total_score: f64, total_words: usize) -> f64 {
    match polarity_for(total_score) {
        Polarity::Neutral => NEUTRAL_CONFIDENCE,
        _ => {
            let density = total_score.abs() / total_words.max(1) as f64;
            (BASE_CONFIDENCE + density * DENSITY_GAIN).min(100.0)
        }
    }
}

pub fn classify(
    total_score: f64,
    total_words: usize,
    sentence_count: usize,
    profile: &LanguageProfile,
) -> AnalysisResult {
    let polarity = polarity_for(total_score);
    AnalysisResult {
        language: profile.id.clone(),
        polarity,
        label: profile.label(polarity).to_string(),
        confidence: confidence_for(total_score, total_words),
        total_score,
        word_count: total_words,
        sentence_count,
        buckets: Buckets::from_score(total_score, sentence_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProfileRegistry;

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(polarity_for(1.0), Polarity::Neutral);
        assert_eq!(polarity_for(-1.0), Polarity::Neutral);
        assert_eq!(polarity_for(1.01), Polarity::Positive);
        assert_eq!(polarity_for(-1.01), Polarity::Negative);
        assert_eq!(polarity_for(0.0), Polarity::Neutral);
    }

    #[test]
    fn neutral_confidence_is_flat() {
        assert_eq!(confidence_for(0.0, 10), 50.0);
        assert_eq!(confidence_for(-1.0, 0), 50.0);
    }

    #[test]
    fn density_scales_and_caps() {
        assert!((confidence_for(2.0, 4) - 80.0).abs() < 1e-9);
        assert!((confidence_for(-2.0, 4) - 80.0).abs() < 1e-9);
        assert_eq!(confidence_for(9.0, 1), 100.0);
        // zero words uses the floor of one
        assert_eq!(confidence_for(3.0, 0), 100.0);
    }

    #[test]
    fn confidence_stays_in_range() {
        for s in [-50.0, -3.2, -1.0001, 0.0, 1.5, 4.6, 1e6] {
            for w in [0usize, 1, 2, 7, 1000] {
                let c = confidence_for(s, w);
                assert!((0.0..=100.0).contains(&c), "score {s} words {w} => {c}");
            }
        }
    }

    #[test]
    fn buckets_are_non_negative_and_exclusive() {
        for s in [-4.0, -0.5, 0.0, 0.5, 4.0] {
            for n in [0usize, 1, 3] {
                let b = Buckets::from_score(s, n);
                assert!(b.positive >= 0.0 && b.negative >= 0.0 && b.neutral >= 0.0);
                assert!(!(b.positive > 0.0 && b.negative > 0.0));
            }
        }
        let b = Buckets::from_score(-0.5, 3);
        assert_eq!(b.negative, 0.5);
        assert_eq!(b.neutral, 2.5);
    }

    #[test]
    fn idle_chart_is_all_neutral() {
        let s = Buckets::idle().slices();
        assert_eq!(s.map(|x| x.value), [0.0, 0.0, 1.0]);
        assert_eq!(s[2].name, "Neutral");
    }

    #[test]
    fn classify_uses_profile_labels() {
        let reg = ProfileRegistry::builtin();
        let r = classify(-3.0, 3, 1, reg.resolve("de"));
        assert_eq!(r.polarity, Polarity::Negative);
        assert_eq!(r.label, "Negativ");
        assert_eq!(r.language, "de");
        assert_eq!(r.confidence_display(), "100.0");
    }
}
