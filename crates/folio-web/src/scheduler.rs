// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

use crate::InternalEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Delivers an internal event after a delay unless cancelled first.
pub trait Scheduler {
    fn schedule(
        &mut self,
        delay: Duration,
        event: InternalEvent,
        tx: Sender<InternalEvent>,
    ) -> TimerHandle;

    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<T: Scheduler + ?Sized> Scheduler for &mut T {
    fn schedule(
        &mut self,
        delay: Duration,
        event: InternalEvent,
        tx: Sender<InternalEvent>,
    ) -> TimerHandle {
        (**self).schedule(delay, event, tx)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}

/// One sleeper thread per timer. Dropping the cancel sender wakes the sleeper
/// early, so dropping the scheduler cancels everything still pending.
#[derive(Debug, Default)]
pub struct ThreadScheduler {
    next_id: u64,
    pending: HashMap<u64, (Sender<()>, JoinHandle<()>)>,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|(_, sleeper)| !sleeper.is_finished())
            .count()
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule(
        &mut self,
        delay: Duration,
        event: InternalEvent,
        tx: Sender<InternalEvent>,
    ) -> TimerHandle {
        self.pending.retain(|_, (_, sleeper)| !sleeper.is_finished());

        self.next_id = self.next_id.saturating_add(1);
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let sleeper = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                let _ = tx.send(event);
            }
        });
        self.pending.insert(self.next_id, (cancel_tx, sleeper));
        TimerHandle(self.next_id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.remove(&handle.0).is_some() {
            debug!(timer = handle.0, "timer cancelled");
        }
    }
}

struct VirtualTimer {
    id: u64,
    due: Duration,
    event: InternalEvent,
    tx: Sender<InternalEvent>,
}

/// Deterministic clock that only moves when told to.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<VirtualTimer>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Moves the clock forward and delivers every timer due by then, earliest
    /// first. Returns how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.now = self.now.saturating_add(by);
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|timer| timer.due <= now);
        self.timers = waiting;
        due.sort_by_key(|timer| (timer.due, timer.id));

        let fired = due.len();
        for timer in due {
            let _ = timer.tx.send(timer.event);
        }
        fired
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(
        &mut self,
        delay: Duration,
        event: InternalEvent,
        tx: Sender<InternalEvent>,
    ) -> TimerHandle {
        self.next_id = self.next_id.saturating_add(1);
        self.timers.push(VirtualTimer {
            id: self.next_id,
            due: self.now.saturating_add(delay),
            event,
            tx,
        });
        TimerHandle(self.next_id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| timer.id != handle.0);
    }
}
