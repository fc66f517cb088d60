// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Log output for the `folio` binary. Everything goes to stderr so stdout
//! stays machine-readable.

use anyhow::{Result, anyhow};
use std::io;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Full filter directive that overrides the configured level.
pub const LOG_ENV_VAR: &str = "FOLIO_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human oriented.
    Pretty,
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
        }
    }
}

pub fn init_logging(config: &LogConfig) -> Result<()> {
    init_logging_with_writer(config, io::stderr)
}

pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(writer))
            .try_init(),
    };
    installed.map_err(|error| anyhow!("install log subscriber: {error}"))
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| default_filter(level))
}

fn default_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::new(format!(
        "warn,folio={level},folio_app={level},folio_web={level}"
    ))
}
