//! history.rs: bounded in-memory list of recent analyses, most recent first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::confidence::AnalysisResult;
use crate::profile::Polarity;

pub const DEFAULT_HISTORY_CAP: usize = 6;
/// Characters of the submitted text shown in the display list.
pub const PREVIEW_CHARS: usize = 60;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub text: String,
    pub language: String,
    pub polarity: Polarity,
    pub label: String,
    pub confidence: f64,
    pub ts: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(text: &str, r: &AnalysisResult, ts: DateTime<Utc>) -> Self {
        Self {
            text: text.trim().to_string(),
            language: r.language.clone(),
            polarity: r.polarity,
            label: r.label.clone(),
            confidence: r.confidence,
            ts,
        }
    }

    pub fn confidence_display(&self) -> String {
        format!("{:.1}", self.confidence)
    }

    /// Text cut to [`PREVIEW_CHARS`] characters, `...` appended when cut.
    pub fn preview(&self) -> String {
        truncate_chars(&self.text, PREVIEW_CHARS)
    }

    /// `<li><b>label</b> (conf%) → preview</li>` with label and text escaped.
    pub fn render_html(&self) -> String {
        format!(
            "<li><b>{}</b> ({}%) → {}</li>",
            html_escape::encode_quoted_attribute(&self.label),
            self.confidence_display(),
            html_escape::encode_quoted_attribute(&self.preview())
        )
    }
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<VecDeque<HistoryEntry>>,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAP)
    }
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, 10_000);
        Self {
            inner: Mutex::new(VecDeque::with_capacity(cap + 1)),
            cap,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Insert at the front, evicting the oldest beyond capacity.
    pub fn push(&self, entry: HistoryEntry) {
        let mut v = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        v.push_front(entry);
        v.truncate(self.cap);
    }

    pub fn record(&self, text: &str, r: &AnalysisResult) {
        self.push(HistoryEntry::new(text, r, Utc::now()));
    }

    /// Entries, most recent first.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        let v = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        v.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<HistoryEntry> {
        let v = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        v.front().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render_html(&self) -> String {
        self.snapshot()
            .iter()
            .map(HistoryEntry::render_html)
            .collect::<Vec<_>>()
            .join("")
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}{}", &s[..idx], ELLIPSIS),
        None => s.to_string(),
    }
}
