// tests/pipeline_flow.rs
//
// Transcript → analyze → speak stages wired through tokio channels.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::time::timeout;

use voice_sentiment_analyzer::{
    AnalysisSession, Pipeline, PipelineEvent, Polarity, SpeechSink, Transcript, Utterance,
};

#[derive(Default)]
struct CollectingSink {
    spoken: Mutex<Vec<Utterance>>,
}

#[async_trait]
impl SpeechSink for CollectingSink {
    async fn speak(&self, u: &Utterance) -> anyhow::Result<()> {
        self.spoken.lock().unwrap().push(u.clone());
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl SpeechSink for FailingSink {
    async fn speak(&self, _u: &Utterance) -> anyhow::Result<()> {
        Err(anyhow!("no audio device"))
    }
}

async fn next_event(rx: &mut tokio::sync::broadcast::Receiver<PipelineEvent>) -> PipelineEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("event in time")
        .expect("channel open")
}

#[tokio::test]
async fn spoken_transcript_is_analyzed_recorded_and_spoken() {
    let session = AnalysisSession::default();
    let sink = Arc::new(CollectingSink::default());
    let pipeline = Pipeline::spawn(session.clone(), sink.clone(), 8);
    let mut events = pipeline.subscribe();

    pipeline
        .submit(Transcript::spoken("Ich liebe das sehr gut", "de"))
        .await
        .unwrap();

    match next_event(&mut events).await {
        PipelineEvent::Analyzed(r) => {
            assert_eq!(r.polarity, Polarity::Positive);
            assert_eq!(r.language, "de");
        }
        other => panic!("unexpected {other:?}"),
    }

    pipeline.shutdown().await;

    assert_eq!(session.history().len(), 1);
    let spoken = sink.spoken.lock().unwrap().clone();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].locale, "de-DE");
    assert!(spoken[0].message.starts_with("Ich denke, das ist Positiv mit"));
}

#[tokio::test]
async fn typed_transcript_is_not_spoken() {
    let sink = Arc::new(CollectingSink::default());
    let pipeline = Pipeline::spawn(AnalysisSession::default(), sink.clone(), 8);
    let mut events = pipeline.subscribe();

    pipeline.submit(Transcript::typed("awful", "en")).await.unwrap();
    assert!(matches!(next_event(&mut events).await, PipelineEvent::Analyzed(_)));

    pipeline.shutdown().await;
    assert!(sink.spoken.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_spoken_transcript_speaks_localized_prompt() {
    let session = AnalysisSession::default();
    let sink = Arc::new(CollectingSink::default());
    let pipeline = Pipeline::spawn(session.clone(), sink.clone(), 8);
    let mut events = pipeline.subscribe();

    pipeline.submit(Transcript::spoken("   ", "hi")).await.unwrap();
    match next_event(&mut events).await {
        PipelineEvent::Empty { language, prompt } => {
            assert_eq!(language, "hi");
            assert_eq!(prompt, "⚠️ कृपया कुछ लिखें या बोलें!");
        }
        other => panic!("unexpected {other:?}"),
    }

    pipeline.shutdown().await;
    assert!(session.history().is_empty());
    let spoken = sink.spoken.lock().unwrap().clone();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].locale, "hi-IN");
}

#[tokio::test]
async fn speech_failures_do_not_block_analysis() {
    let session = AnalysisSession::default();
    let pipeline = Pipeline::spawn(session.clone(), Arc::new(FailingSink), 8);
    let mut events = pipeline.subscribe();

    for i in 0..5 {
        pipeline
            .submit(Transcript::spoken(format!("great day {i}"), "en"))
            .await
            .unwrap();
    }
    for _ in 0..5 {
        assert!(matches!(next_event(&mut events).await, PipelineEvent::Analyzed(_)));
    }

    pipeline.shutdown().await;
    assert_eq!(session.history().len(), 5);
}

#[tokio::test]
async fn stopped_speech_stage_leaves_analysis_running() {
    let session = AnalysisSession::default();
    let sink = Arc::new(CollectingSink::default());
    let pipeline = Pipeline::spawn(session.clone(), sink, 4);
    let mut events = pipeline.subscribe();

    pipeline.stop_speech();
    for text in ["good", "bad", "love"] {
        pipeline.submit(Transcript::spoken(text, "en")).await.unwrap();
    }
    for _ in 0..3 {
        assert!(matches!(next_event(&mut events).await, PipelineEvent::Analyzed(_)));
    }

    pipeline.shutdown().await;
    assert_eq!(session.history().len(), 3);
}
