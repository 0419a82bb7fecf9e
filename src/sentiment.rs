//! # Sentence Scorer
//! Folds a sentence's normalized tokens into a score and a word count.
//!
//! - Negation token: arms a sign flip for the next lexicon hit.
//! - Intensifier token: sets the multiplier for the next lexicon hit.
//! - Lexicon token: adds `weight * multiplier` (flipped if armed), then resets both.
//! - Negations and intensifiers are not counted as words; everything else is.
//!
//! State never crosses a sentence boundary.

use serde::Serialize;

use crate::profile::LanguageProfile;

/// Per-sentence accumulator. Negation and intensity each apply to the next
/// lexicon hit only.
#[derive(Debug, Clone, Copy)]
pub struct SentenceState {
    pub score: f64,
    pub negate_pending: bool,
    pub intensity_pending: f64,
    pub words: usize,
}

impl Default for SentenceState {
    fn default() -> Self {
        Self {
            score: 0.0,
            negate_pending: false,
            intensity_pending: 1.0,
            words: 0,
        }
    }
}

impl SentenceState {
    /// Feed one normalized token. Checks negation, then intensifier, then lexicon.
    pub fn push(&mut self, token: &str, profile: &LanguageProfile) {
        if profile.negations.contains(token) {
            self.negate_pending = true;
            return;
        }

        if let Some(&m) = profile.intensifiers.get(token) {
            self.intensity_pending = m;
            return;
        }

        if let Some(&base) = profile.lexicon.get(token) {
            let mut w = base as f64;
            if self.negate_pending {
                w = -w;
                self.negate_pending = false;
            }
            self.score += w * self.intensity_pending;
            self.intensity_pending = 1.0;
        }

        self.words += 1;
    }

    pub fn finish(self) -> SentenceScore {
        SentenceScore {
            score: self.score,
            words: self.words,
        }
    }
}

/// Score and counted words for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentenceScore {
    pub score: f64,
    pub words: usize,
}

/// Run the state machine over one sentence's tokens.
pub fn score_sentence<S: AsRef<str>>(tokens: &[S], profile: &LanguageProfile) -> SentenceScore {
    let mut st = SentenceState::default();
    for t in tokens {
        st.push(t.as_ref(), profile);
    }
    st.finish()
}
