use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::confidence::{AnalysisResult, Slice};
use crate::history::HistoryEntry;
use crate::profile::Polarity;
use crate::registry::LanguageInfo;
use crate::session::AnalysisSession;
use crate::speech::{empty_prompt, speak_template, Utterance};

#[derive(Clone)]
pub struct AppState {
    pub session: AnalysisSession,
}

impl AppState {
    pub fn new(session: AnalysisSession) -> Self {
        Self { session }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/history", get(history))
        .route("/history/html", get(history_html))
        .route("/speech/latest", get(speech_latest))
        .route("/languages", get(languages))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    speak: bool,
}

#[derive(Serialize)]
struct AnalyzeResp {
    #[serde(flatten)]
    result: AnalysisResult,
    emoji: &'static str,
    color: &'static str,
    confidence_display: String,
    locale: String,
    slices: [Slice; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    speech: Option<Utterance>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    locale: String,
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Response {
    let lang = body.lang.as_deref().unwrap_or_default();
    let profile = state.session.profile(lang);

    match state.session.analyze(&body.text, lang) {
        Ok(result) => {
            let speech = body.speak.then(|| {
                Utterance::new(
                    speak_template(&result.label, result.confidence, profile),
                    profile,
                )
            });
            let resp = AnalyzeResp {
                emoji: result.polarity.emoji(),
                color: result.polarity.color(),
                confidence_display: result.confidence_display(),
                locale: profile.locale.clone(),
                slices: result.buckets.slices(),
                speech,
                result,
            };
            Json(resp).into_response()
        }
        Err(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: "empty_input",
                message: empty_prompt(profile).to_string(),
                locale: profile.locale.clone(),
            }),
        )
            .into_response(),
    }
}

#[derive(Serialize)]
struct HistoryOut {
    ts: String,
    language: String,
    polarity: Polarity,
    label: String,
    confidence: String,
    preview: String,
}

impl From<HistoryEntry> for HistoryOut {
    fn from(h: HistoryEntry) -> Self {
        Self {
            ts: h.ts.to_rfc3339(),
            confidence: h.confidence_display(),
            preview: h.preview(),
            language: h.language,
            polarity: h.polarity,
            label: h.label,
        }
    }
}

async fn history(State(state): State<AppState>) -> Json<Vec<HistoryOut>> {
    let rows = state.session.history().snapshot();
    Json(rows.into_iter().map(HistoryOut::from).collect())
}

async fn history_html(State(state): State<AppState>) -> Html<String> {
    Html(state.session.history().render_html())
}

#[derive(Deserialize)]
struct LangQuery {
    #[serde(default)]
    lang: Option<String>,
}

#[derive(Serialize)]
struct LatestSpeech {
    #[serde(flatten)]
    utterance: Utterance,
    has_result: bool,
}

async fn speech_latest(
    State(state): State<AppState>,
    Query(q): Query<LangQuery>,
) -> Json<LatestSpeech> {
    let lang = q.lang.as_deref().unwrap_or_default();
    Json(LatestSpeech {
        utterance: state.session.latest_utterance(lang),
        has_result: !state.session.history().is_empty(),
    })
}

async fn languages(State(state): State<AppState>) -> Json<Vec<LanguageInfo>> {
    Json(state.session.registry().languages())
}
