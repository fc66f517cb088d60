// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod layout;
pub mod scheduler;

use anyhow::Result;
use folio_app::{
    ContactFormState, DEFAULT_HEADER_OFFSET, DEFAULT_RECIPIENT, DEFAULT_SCROLLED_THRESHOLD,
    DEFAULT_STATUS_CLEAR_MILLIS, Field, FormCommand, FormEvent, NavCommand, NavEvent, NavState,
    Navigator, PageDocument, ScrollStrategy, SectionId, SectionTracker, SubmitOutcome, Theme,
};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::{debug, warn};

pub use layout::StaticLayout;
pub use scheduler::{Scheduler, ThreadScheduler, TimerHandle, VirtualScheduler};

const POLL_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub recipient: String,
    pub status_clear_delay: Duration,
    pub header_offset: f64,
    pub scrolled_threshold: f64,
    pub strategy: ScrollStrategy,
    pub theme: Theme,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_owned(),
            status_clear_delay: Duration::from_millis(DEFAULT_STATUS_CLEAR_MILLIS),
            header_offset: DEFAULT_HEADER_OFFSET,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
            strategy: ScrollStrategy::Viewport,
            theme: Theme::Light,
        }
    }
}

/// Things the host reports to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    Mount,
    Scroll,
    Resize,
    Edit { field: Field, value: String },
    Submit,
    NavigateTo { section: String },
    ToggleMenu,
    ToggleTheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

/// Everything observable that a handled event changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum PageUpdate {
    Nav { event: NavEvent },
    Form { event: FormEvent },
    Submitted { outcome: SubmitOutcome },
    ScrolledTo { section: SectionId },
    ScrollIgnored { target: String },
}

pub struct Page<D: PageDocument, N: Navigator, S: Scheduler> {
    config: PageConfig,
    nav: NavState,
    form: ContactFormState,
    tracker: SectionTracker,
    document: D,
    navigator: N,
    scheduler: S,
    pending_clear: Option<TimerHandle>,
    internal_tx: Sender<InternalEvent>,
    internal_rx: Receiver<InternalEvent>,
}

impl<D: PageDocument, N: Navigator, S: Scheduler> Page<D, N, S> {
    pub fn new(config: PageConfig, document: D, navigator: N, scheduler: S) -> Self {
        let tracker = SectionTracker::new(config.header_offset, config.strategy);
        let nav = NavState {
            active: tracker.first(),
            theme: config.theme,
            ..NavState::default()
        };
        let (internal_tx, internal_rx) = mpsc::channel();
        Self {
            config,
            nav,
            form: ContactFormState::default(),
            tracker,
            document,
            navigator,
            scheduler,
            pending_clear: None,
            internal_tx,
            internal_rx,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn form(&self) -> &ContactFormState {
        &self.form
    }

    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<PageUpdate> {
        debug!(?event, "page event");
        match event {
            PageEvent::Mount | PageEvent::Scroll | PageEvent::Resize => self.sync_scroll(),
            PageEvent::Edit { field, value } => self
                .form
                .dispatch(FormCommand::Edit { field, value })
                .into_iter()
                .map(|event| PageUpdate::Form { event })
                .collect(),
            PageEvent::Submit => self.submit(),
            PageEvent::NavigateTo { section } => self.navigate_to(&section),
            PageEvent::ToggleMenu => nav_updates(self.nav.dispatch(NavCommand::ToggleMenu)),
            PageEvent::ToggleTheme => nav_updates(self.nav.dispatch(NavCommand::ToggleTheme)),
        }
    }

    /// Drains timer deliveries; stale status clears are dropped by token.
    pub fn pump(&mut self) -> Vec<PageUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = self.internal_rx.try_recv() {
            match event {
                InternalEvent::ClearStatus { token } => {
                    if token == self.form.status_token() {
                        self.pending_clear = None;
                    }
                    updates.extend(
                        self.form
                            .dispatch(FormCommand::ClearStatus { token })
                            .into_iter()
                            .map(|event| PageUpdate::Form { event }),
                    );
                }
            }
        }
        updates
    }

    fn sync_scroll(&mut self) -> Vec<PageUpdate> {
        let scrolled = self.document.scroll_y() > self.config.scrolled_threshold;
        let active = self.tracker.resolve(&self.document, self.nav.active);

        let mut events = self.nav.dispatch(NavCommand::SetScrolled(scrolled));
        events.extend(self.nav.dispatch(NavCommand::SetActive(active)));
        nav_updates(events)
    }

    fn navigate_to(&mut self, target: &str) -> Vec<PageUpdate> {
        let scrolled = self
            .tracker
            .lookup(target)
            .filter(|section| self.tracker.scroll_to(&mut self.document, *section));
        let Some(section) = scrolled else {
            return vec![PageUpdate::ScrollIgnored {
                target: target.to_owned(),
            }];
        };

        let mut updates = vec![PageUpdate::ScrolledTo { section }];
        updates.extend(nav_updates(self.nav.dispatch(NavCommand::CloseMenu)));
        updates.extend(self.sync_scroll());
        updates
    }

    fn submit(&mut self) -> Vec<PageUpdate> {
        let outcome = self
            .form
            .submit(&self.config.recipient, &mut self.navigator);
        if outcome != SubmitOutcome::Busy {
            self.replace_status_clear(outcome.clear_token());
        }
        vec![PageUpdate::Submitted { outcome }]
    }

    /// Drops any pending status clear, then arms a new one when a token is given.
    fn replace_status_clear(&mut self, token: Option<u64>) {
        if let Some(previous) = self.pending_clear.take() {
            self.scheduler.cancel(previous);
        }
        let Some(token) = token else {
            return;
        };
        let handle = self.scheduler.schedule(
            self.config.status_clear_delay,
            InternalEvent::ClearStatus { token },
            self.internal_tx.clone(),
        );
        self.pending_clear = Some(handle);
    }
}

impl<D: PageDocument, N: Navigator> Page<D, N, VirtualScheduler> {
    /// Moves virtual time forward and applies whatever fired.
    pub fn advance(&mut self, by: Duration) -> Vec<PageUpdate> {
        self.scheduler.advance(by);
        self.pump()
    }
}

impl<D: PageDocument, N: Navigator, S: Scheduler> Drop for Page<D, N, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_clear.take() {
            debug!(timer = handle.id(), "page dropped with pending status clear");
            self.scheduler.cancel(handle);
        }
    }
}

fn nav_updates(events: Vec<NavEvent>) -> Vec<PageUpdate> {
    events
        .into_iter()
        .map(|event| PageUpdate::Nav { event })
        .collect()
}

/// Feeds host events into the page until the sender hangs up, applying timer
/// deliveries between events. The page is mounted first.
pub fn run_page<D, N, S, F>(
    page: &mut Page<D, N, S>,
    events: &Receiver<PageEvent>,
    mut on_update: F,
) -> Result<()>
where
    D: PageDocument,
    N: Navigator,
    S: Scheduler,
    F: FnMut(&PageUpdate) -> Result<()>,
{
    for update in page.handle(PageEvent::Mount) {
        on_update(&update)?;
    }

    loop {
        for update in page.pump() {
            on_update(&update)?;
        }

        match events.recv_timeout(POLL_INTERVAL) {
            Ok(event) => {
                for update in page.handle(event) {
                    on_update(&update)?;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if page.pending_clear.is_some() {
                    warn!("event source closed before the status clear fired");
                }
                return Ok(());
            }
        }
    }
}
