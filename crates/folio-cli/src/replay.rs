// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use folio_app::{Field, Navigator, PageDocument};
use folio_web::{Page, PageEvent, PageUpdate, StaticLayout, VirtualScheduler};
use serde::Deserialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info};

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Step {
    Mount,
    /// Moves the document first when `y` is given.
    Scroll {
        #[serde(default)]
        y: Option<f64>,
    },
    Resize {
        #[serde(default)]
        height: Option<f64>,
    },
    Edit {
        field: Field,
        value: String,
    },
    Submit,
    NavigateTo {
        section: String,
    },
    ToggleMenu,
    ToggleTheme,
    /// Advances the virtual clock.
    Wait {
        ms: u64,
    },
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("parse replay step on line {}", idx + 1))
        })
        .collect()
}

impl Step {
    pub fn apply<N: Navigator>(
        self,
        page: &mut Page<StaticLayout, N, VirtualScheduler>,
    ) -> Vec<PageUpdate> {
        match self {
            Self::Mount => page.handle(PageEvent::Mount),
            Self::Scroll { y } => {
                if let Some(y) = y {
                    page.document_mut().set_scroll_y(y);
                }
                page.handle(PageEvent::Scroll)
            }
            Self::Resize { height } => {
                if let Some(height) = height {
                    page.document_mut().set_viewport_height(height);
                }
                page.handle(PageEvent::Resize)
            }
            Self::Edit { field, value } => page.handle(PageEvent::Edit { field, value }),
            Self::Submit => page.handle(PageEvent::Submit),
            Self::NavigateTo { section } => page.handle(PageEvent::NavigateTo { section }),
            Self::ToggleMenu => page.handle(PageEvent::ToggleMenu),
            Self::ToggleTheme => page.handle(PageEvent::ToggleTheme),
            Self::Wait { ms } => page.advance(Duration::from_millis(ms)),
        }
    }
}

/// Mounts the page, then runs every step, writing each update as a JSON line.
pub fn replay<N, W>(
    steps: Vec<Step>,
    page: &mut Page<StaticLayout, N, VirtualScheduler>,
    out: &mut W,
) -> Result<()>
where
    N: Navigator,
    W: Write,
{
    write_updates(out, &page.handle(PageEvent::Mount))?;
    let total = steps.len();
    for step in steps {
        debug!(?step, "replay step");
        let updates = step.apply(page);
        write_updates(out, &updates)?;
    }
    info!(
        steps = total,
        scroll_y = page.document().scroll_y(),
        pending_timers = page.scheduler().pending(),
        "replay finished"
    );
    Ok(())
}

pub fn write_updates<W: Write>(out: &mut W, updates: &[PageUpdate]) -> Result<()> {
    for update in updates {
        serde_json::to_writer(&mut *out, update).context("encode page update")?;
        writeln!(out).context("write page update")?;
    }
    Ok(())
}

/// Prints each URI it is asked to open as `{"opened": <uri>}` on stdout.
#[derive(Debug, Default)]
pub struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn open(&mut self, uri: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &serde_json::json!({ "opened": uri }))
            .context("write navigation")?;
        writeln!(stdout).context("write navigation")?;
        Ok(())
    }
}
