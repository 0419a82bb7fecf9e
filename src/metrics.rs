use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and describe the analyzer's series.
    /// Call once per process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        describe_counter!(
            "sentiment_analyses_total",
            "Completed analyses, labelled by polarity."
        );
        describe_counter!(
            "sentiment_empty_inputs_total",
            "Analyses rejected because the text was empty."
        );
        describe_counter!(
            "sentiment_speech_failures_total",
            "Utterances the speech collaborator failed to play."
        );
        describe_histogram!(
            "sentiment_confidence",
            "Confidence percentage of completed analyses."
        );

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
