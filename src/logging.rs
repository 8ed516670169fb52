//! Logging setup for the headless binary
//!
//! `RUST_LOG` wins over the configured level when set.

use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| filter_directive(&config.level));
    let env_filter = EnvFilter::try_new(filter)?;

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt = tracing_subscriber::fmt::layer().with_writer(writer);
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format.as_str() {
        "json" => fmt.json().boxed(),
        _ => fmt.boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn filter_directive(level: &str) -> String {
    format!("attrition={},warn", level)
}
