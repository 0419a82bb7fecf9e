//! # Stage Pipeline
//! Transcript → analyze → result → speak, as two tokio tasks joined by bounded
//! channels.
//!
//! - Transcribers push [`Transcript`]s via [`Pipeline::submit`].
//! - Every outcome is broadcast as a [`PipelineEvent`] (chart/display consumers).
//! - Transcripts flagged `speak` produce an [`Utterance`] for the speech stage.
//! - The speech stage can be stopped on its own; analysis keeps running.

use anyhow::{anyhow, Result};
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::confidence::AnalysisResult;
use crate::session::AnalysisSession;
use crate::speech::{empty_prompt, speak_template, SpeechSink, Utterance};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Final text from a transcriber (or a typed submission).
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
    pub language: String,
    /// Speak the outcome back (voice-originated input).
    pub speak: bool,
}

impl Transcript {
    pub fn spoken(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            speak: true,
        }
    }

    pub fn typed(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            speak: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineEvent {
    Analyzed(AnalysisResult),
    Empty { language: String, prompt: String },
}

pub struct Pipeline {
    input: mpsc::Sender<Transcript>,
    events: broadcast::Sender<PipelineEvent>,
    analyze_task: JoinHandle<()>,
    speech_task: JoinHandle<()>,
}

impl Pipeline {
    /// Start both stages on the current tokio runtime.
    pub fn spawn(session: AnalysisSession, sink: Arc<dyn SpeechSink>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (input, transcripts) = mpsc::channel(capacity);
        let (speech_tx, utterances) = mpsc::channel(capacity);
        let (events, _) = broadcast::channel(capacity);

        let analyze_task = tokio::spawn(analyze_stage(
            session,
            transcripts,
            speech_tx,
            events.clone(),
        ));
        let speech_task = tokio::spawn(speech_stage(utterances, sink));

        Self {
            input,
            events,
            analyze_task,
            speech_task,
        }
    }

    pub async fn submit(&self, t: Transcript) -> Result<()> {
        self.input
            .send(t)
            .await
            .map_err(|_| anyhow!("analysis stage is not running"))
    }

    /// Receive every event produced after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    /// Stop speaking; pending utterances are dropped, analysis continues.
    pub fn stop_speech(&self) {
        self.speech_task.abort();
    }

    /// Close the input and wait until both stages drained.
    pub async fn shutdown(self) {
        let Pipeline {
            input,
            analyze_task,
            speech_task,
            ..
        } = self;
        drop(input);
        if let Err(e) = analyze_task.await {
            warn!(target: "pipeline", error = %e, "analysis stage ended abnormally");
        }
        if let Err(e) = speech_task.await {
            if !e.is_cancelled() {
                warn!(target: "pipeline", error = %e, "speech stage ended abnormally");
            }
        }
    }
}

async fn analyze_stage(
    session: AnalysisSession,
    mut transcripts: mpsc::Receiver<Transcript>,
    speech_tx: mpsc::Sender<Utterance>,
    events: broadcast::Sender<PipelineEvent>,
) {
    while let Some(t) = transcripts.recv().await {
        let (event, utterance) = {
            let profile = session.profile(&t.language);
            match session.analyze(&t.text, &t.language) {
                Ok(result) => {
                    let utt = t.speak.then(|| {
                        Utterance::new(
                            speak_template(&result.label, result.confidence, profile),
                            profile,
                        )
                    });
                    (PipelineEvent::Analyzed(result), utt)
                }
                Err(_) => {
                    let prompt = empty_prompt(profile).to_string();
                    let utt = t.speak.then(|| Utterance::new(prompt.clone(), profile));
                    let ev = PipelineEvent::Empty {
                        language: profile.id.clone(),
                        prompt,
                    };
                    (ev, utt)
                }
            }
        };

        // No subscribers is fine.
        let _ = events.send(event);

        if let Some(u) = utterance {
            if speech_tx.send(u).await.is_err() {
                debug!(target: "pipeline", "speech stage stopped; utterance dropped");
            }
        }
    }
    debug!(target: "pipeline", "analysis stage drained");
}

async fn speech_stage(mut utterances: mpsc::Receiver<Utterance>, sink: Arc<dyn SpeechSink>) {
    while let Some(u) = utterances.recv().await {
        if let Err(e) = sink.speak(&u).await {
            counter!("sentiment_speech_failures_total").increment(1);
            warn!(target: "speech", error = %e, locale = %u.locale, "speech output failed");
        }
    }
    debug!(target: "pipeline", "speech stage drained");
}
