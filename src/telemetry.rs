//! Tracing setup and log-safe text fingerprints.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_JSON: &str = "SENTIMENT_LOG_JSON";
const DEFAULT_FILTER: &str = "voice_sentiment_analyzer=info,warn";

/// Install the global subscriber. `RUST_LOG` overrides the default filter and
/// `SENTIMENT_LOG_JSON=1` switches to JSON lines. A subscriber installed
/// earlier (e.g. by the deployment runtime) is left alone.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(ENV_LOG_JSON).ok().is_some_and(|v| v == "1");

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Short SHA-256 prefix identifying a text without logging it.
pub fn anon_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
