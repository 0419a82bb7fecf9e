//! Feeds lines from stdin through the transcript → analyze → speak pipeline
//! and prints each outcome. Usage: `analyze_text [lang] [--speak] < input.txt`

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use voice_sentiment_analyzer::{
    speech::TracingSpeechSink, telemetry, AnalysisSession, AppConfig, Pipeline, PipelineEvent,
    Transcript,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let speak = args.iter().any(|a| a == "--speak");
    let lang = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "en".to_string());

    let cfg = AppConfig::load()?;
    let session = AnalysisSession::from_config(&cfg)?;
    let pipeline = Pipeline::spawn(
        session.clone(),
        Arc::new(TracingSpeechSink),
        cfg.channel_capacity,
    );
    let mut events = pipeline.subscribe();

    let printer = tokio::spawn(async move {
        loop {
            let ev = match events.recv().await {
                Ok(ev) => ev,
                Err(RecvError::Lagged(n)) => {
                    eprintln!("(skipped {n} results)");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            match ev {
                PipelineEvent::Analyzed(r) => println!(
                    "{} {} ({}%) score={:+.2} words={} buckets=[{:.2}, {:.2}, {:.2}]",
                    r.polarity.emoji(),
                    r.label,
                    r.confidence_display(),
                    r.total_score,
                    r.word_count,
                    r.buckets.positive,
                    r.buckets.negative,
                    r.buckets.neutral
                ),
                PipelineEvent::Empty { prompt, .. } => println!("{prompt}"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let t = if speak {
            Transcript::spoken(line, lang.as_str())
        } else {
            Transcript::typed(line, lang.as_str())
        };
        pipeline.submit(t).await?;
    }

    pipeline.shutdown().await;
    printer.await?;

    println!("--- recent ---");
    for e in session.history().snapshot() {
        println!("{} ({}%) → {}", e.label, e.confidence_display(), e.preview());
    }
    Ok(())
}
