// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use folio_app::{
    DEFAULT_HEADER_OFFSET, DEFAULT_RECIPIENT, DEFAULT_SCROLLED_THRESHOLD, ScrollStrategy, Theme,
    check_recipient, form_trim,
};
use folio_web::PageConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

use crate::logging::{LogConfig, LogFormat};

const APP_NAME: &str = "folio";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_STATUS_CLEAR_DELAY: &str = "5s";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub form: Form,
    #[serde(default)]
    pub scroll: Scroll,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            contact: Contact::default(),
            form: Form::default(),
            scroll: Scroll::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Form {
    pub status_clear_delay: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scroll {
    pub header_offset: Option<f64>,
    pub scrolled_threshold: Option<f64>,
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FOLIO_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FOLIO_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` at the top",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(recipient) = &self.contact.recipient {
            check_recipient(recipient).with_context(|| {
                format!("contact.recipient must be a single email address, got {recipient:?}")
            })?;
        }

        let delay = self.status_clear_delay()?;
        if delay <= Duration::ZERO {
            bail!(
                "form.status_clear_delay must be positive, got {:?}",
                self.form
                    .status_clear_delay
                    .as_deref()
                    .unwrap_or(DEFAULT_STATUS_CLEAR_DELAY)
            );
        }

        for (key, value) in [
            ("scroll.header_offset", self.scroll.header_offset),
            ("scroll.scrolled_threshold", self.scroll.scrolled_threshold),
        ] {
            if let Some(value) = value
                && !(value.is_finite() && value >= 0.0)
            {
                bail!("{key} must be a non-negative number, got {value}");
            }
        }

        self.strategy()?;
        self.theme()?;
        self.log_level()?;
        self.log_format()?;
        Ok(())
    }

    pub fn recipient(&self) -> &str {
        self.contact
            .recipient
            .as_deref()
            .map(form_trim)
            .unwrap_or(DEFAULT_RECIPIENT)
    }

    pub fn status_clear_delay(&self) -> Result<Duration> {
        parse_duration(
            self.form
                .status_clear_delay
                .as_deref()
                .unwrap_or(DEFAULT_STATUS_CLEAR_DELAY),
        )
    }

    pub fn header_offset(&self) -> f64 {
        self.scroll.header_offset.unwrap_or(DEFAULT_HEADER_OFFSET)
    }

    pub fn scrolled_threshold(&self) -> f64 {
        self.scroll
            .scrolled_threshold
            .unwrap_or(DEFAULT_SCROLLED_THRESHOLD)
    }

    pub fn strategy(&self) -> Result<ScrollStrategy> {
        match self.scroll.strategy.as_deref() {
            None => Ok(ScrollStrategy::Viewport),
            Some(raw) => ScrollStrategy::parse(raw).ok_or_else(|| {
                anyhow!("scroll.strategy must be one of: viewport, offset; got {raw:?}")
            }),
        }
    }

    pub fn theme(&self) -> Result<Theme> {
        match self.ui.theme.as_deref() {
            None => Ok(Theme::Light),
            Some(raw) => Theme::parse(raw)
                .ok_or_else(|| anyhow!("ui.theme must be one of: light, dark; got {raw:?}")),
        }
    }

    pub fn log_level(&self) -> Result<Level> {
        let raw = self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        raw.parse().map_err(|_| {
            anyhow!("log.level must be one of: error, warn, info, debug, trace; got {raw:?}")
        })
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match self.log.format.as_deref() {
            None => Ok(LogFormat::default()),
            Some(raw) => LogFormat::parse(raw).ok_or_else(|| {
                anyhow!("log.format must be one of: pretty, compact, json; got {raw:?}")
            }),
        }
    }

    pub fn log_config(&self) -> Result<LogConfig> {
        Ok(LogConfig {
            level: self.log_level()?,
            format: self.log_format()?,
        })
    }

    pub fn page_config(&self) -> Result<PageConfig> {
        Ok(PageConfig {
            recipient: self.recipient().to_owned(),
            status_clear_delay: self.status_clear_delay()?,
            header_offset: self.header_offset(),
            scrolled_threshold: self.scrolled_threshold(),
            strategy: self.strategy()?,
            theme: self.theme()?,
        })
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# folio config\n# Place this file at: {}\n\nversion = 1\n\n[contact]\n# Address the contact form opens a mail draft to.\nrecipient = \"{}\"\n\n[form]\n# How long the success or error banner stays up: <N>ms, <N>s or <N>m.\nstatus_clear_delay = \"{}\"\n\n[scroll]\nheader_offset = {}\nscrolled_threshold = {}\n# viewport | offset\nstrategy = \"viewport\"\n\n[ui]\n# light | dark\ntheme = \"light\"\n\n[log]\n# FOLIO_LOG overrides this with a full filter directive.\nlevel = \"{}\"\n# pretty | compact | json\nformat = \"compact\"\n",
            path.display(),
            DEFAULT_RECIPIENT,
            DEFAULT_STATUS_CLEAR_DELAY,
            DEFAULT_HEADER_OFFSET,
            DEFAULT_SCROLLED_THRESHOLD,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("invalid duration {raw:?}: too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
