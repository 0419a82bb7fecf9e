// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod confidence;
pub mod config;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod pipeline;
pub mod profile;
pub mod registry;
pub mod sentiment;
pub mod session;
pub mod speech;
pub mod telemetry;
pub mod tokenizer;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::confidence::{AnalysisResult, Buckets};
pub use crate::config::AppConfig;
pub use crate::engine::{analyze_text, EmptyInput};
pub use crate::pipeline::{Pipeline, PipelineEvent, Transcript};
pub use crate::profile::{LanguageProfile, Polarity};
pub use crate::registry::ProfileRegistry;
pub use crate::session::AnalysisSession;
pub use crate::speech::{speak_template, SpeechSink, Utterance};

/// Build the HTTP router from configuration (no metrics, no runtime).
pub fn app(cfg: &AppConfig) -> anyhow::Result<axum::Router> {
    let session = AnalysisSession::from_config(cfg)?;
    Ok(create_router(AppState::new(session)))
}
