//! Logging setup from the `[logging]` section.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//! output = "file"
//! file_path = "/var/log/linebot/bot.log"
//!
//! [logging.span_events]
//! close = true
//!
//! [logging.filters]
//! linebot_transport = "trace"
//! ```
//!
//! `RUST_LOG`, when set, replaces `level`. The per-module `filters` are
//! applied on top of either.

use std::ffi::OsStr;
use std::path::Path;

use tracing::{debug, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber described by `config`.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    if try_init_from_config(config).is_err() {
        debug!("Global subscriber already installed, keeping it");
    }
}

/// Installs the global subscriber described by `config`.
///
/// [`LogFormat::Json`] falls back to the full format when the `json-log`
/// feature is disabled. File output without `file_path` falls back to
/// stdout.
pub fn try_init_from_config(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config, EnvFilter::try_from_default_env().ok());
    let layer = fmt_layer(config, make_writer(config));

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    if config.output == LogOutput::File && config.file_path.is_none() {
        warn!("No log file path configured, logging to stdout");
    }
    Ok(())
}

/// Per-module directives, sorted by module so the filter is deterministic.
fn filter_directives(config: &LoggingConfig) -> Vec<String> {
    let mut filters: Vec<_> = config.filters.iter().collect();
    filters.sort_by(|a, b| a.0.cmp(b.0));
    filters
        .into_iter()
        .map(|(module, level)| format!("{module}={}", level.as_str()))
        .collect()
}

fn build_filter(config: &LoggingConfig, from_env: Option<EnvFilter>) -> EnvFilter {
    let mut filter = from_env.unwrap_or_else(|| EnvFilter::new(config.level.as_str()));
    for directive in filter_directives(config) {
        match directive.parse::<Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => warn!(directive = %directive, error = %e, "Ignoring invalid log filter"),
        }
    }
    filter
}

fn span_events(config: &SpanEventConfig) -> FmtSpan {
    [
        (config.new, FmtSpan::NEW),
        (config.enter, FmtSpan::ENTER),
        (config.exit, FmtSpan::EXIT),
        (config.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
}

fn make_writer(config: &LoggingConfig) -> BoxMakeWriter {
    match (config.output, &config.file_path) {
        (LogOutput::Stdout, _) | (LogOutput::File, None) => BoxMakeWriter::new(std::io::stdout),
        (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
        (LogOutput::File, Some(path)) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .unwrap_or_else(|| OsStr::new("linebot.log"));
            BoxMakeWriter::new(tracing_appender::rolling::never(dir, file_name))
        }
    }
}

fn fmt_layer(config: &LoggingConfig, writer: BoxMakeWriter) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_span_events(span_events(&config.span_events))
        .with_thread_ids(config.thread_ids)
        .with_file(config.file_location)
        .with_line_number(config.file_location);

    match config.format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        #[cfg(feature = "json-log")]
        LogFormat::Json => layer.json().boxed(),
        #[cfg(not(feature = "json-log"))]
        LogFormat::Json => layer.boxed(),
        LogFormat::Full => layer.boxed(),
    }
}
