//! Voice Sentiment Service: binary entrypoint
//! Boots the Axum HTTP server with the analysis session, history and metrics.

use shuttle_axum::ShuttleAxum;
use tracing::info;

use voice_sentiment_analyzer::{
    api, metrics::Metrics, telemetry, AnalysisSession, AppConfig, AppState,
};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let cfg = AppConfig::load()?;
    let session = AnalysisSession::from_config(&cfg)?;
    let metrics = Metrics::init()?;

    let router = api::create_router(AppState::new(session)).merge(metrics.router());
    info!(default_lang = %cfg.default_language, "sentiment service ready");

    Ok(router.into())
}
