//! # Analysis Engine
//! Pure pipeline for one text: segment → tokenize → score → classify.
//! No I/O besides tracing/metrics, suitable for unit tests and offline evaluation.

use metrics::{counter, histogram};
use std::fmt;
use tracing::debug;

use crate::confidence::{classify, AnalysisResult};
use crate::profile::LanguageProfile;
use crate::sentiment::score_sentence;
use crate::telemetry::anon_hash;
use crate::tokenizer::{segment, tokenize};

/// Input was empty or whitespace only; no score was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyInput;

impl fmt::Display for EmptyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("empty input")
    }
}

impl std::error::Error for EmptyInput {}

/// Analyze `raw_text` with `profile`.
pub fn analyze_text(raw_text: &str, profile: &LanguageProfile) -> Result<AnalysisResult, EmptyInput> {
    let text = raw_text.trim();
    if text.is_empty() {
        counter!("sentiment_empty_inputs_total").increment(1);
        return Err(EmptyInput);
    }

    let sentences = segment(text);
    let mut total_score = 0.0f64;
    let mut total_words = 0usize;
    for sentence in &sentences {
        let tokens = tokenize(sentence);
        let s = score_sentence(&tokens, profile);
        total_score += s.score;
        total_words += s.words;
    }

    let result = classify(total_score, total_words, sentences.len(), profile);

    counter!("sentiment_analyses_total", "polarity" => result.polarity.as_str()).increment(1);
    histogram!("sentiment_confidence").record(result.confidence);

    // Never log raw text. Only hashed id + aggregates.
    debug!(
        target: "sentiment",
        id = %anon_hash(text),
        lang = %profile.id,
        score = total_score,
        words = total_words,
        sentences = sentences.len(),
        polarity = result.polarity.as_str(),
        confidence = result.confidence,
        "analyzed"
    );

    Ok(result)
}
