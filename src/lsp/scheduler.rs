//! Per-document pass scheduling
//!
//! Each document has a generation, a running pass marker and a
//! trailing-edge debounce. A trigger takes a fresh generation and arms a
//! timer; the timer only runs its pass if no newer trigger arrived
//! meanwhile. A pass that cannot begin because another is running is
//! dropped, not queued. Generations come from one scheduler-wide counter,
//! so they never repeat for a URI across close and reopen.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tower_lsp::lsp_types::Url;
use tracing::debug;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    /// Generation of the running pass
    running: Option<u64>,
    /// Document closed while its pass was still running
    closed: bool,
}

pub struct PassScheduler {
    interval: Duration,
    next_generation: AtomicU64,
    slots: Mutex<HashMap<Url, Slot>>,
}

impl PassScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_generation: AtomicU64::new(1),
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<Url, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn bump(&self, slot: &mut Slot) -> u64 {
        slot.generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        slot.generation
    }

    /// Give `uri` a new generation and run `pass` after the debounce
    /// interval unless another trigger supersedes it.
    pub fn trigger<F>(self: &Arc<Self>, uri: &Url, pass: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = {
            let mut slots = self.lock_slots();
            let slot = slots.entry(uri.clone()).or_default();
            slot.closed = false;
            self.bump(slot)
        };

        let scheduler = Arc::clone(self);
        let uri = uri.clone();
        tokio::spawn(async move {
            tokio::time::sleep(scheduler.interval).await;
            if !scheduler.is_current(&uri, generation) {
                debug!("Trigger {} for {} superseded", generation, uri);
                return;
            }
            pass.await;
        });
    }

    /// Mark a pass as running. Returns the generation the pass works on,
    /// or `None` if a pass is already running for `uri`.
    pub fn try_begin(&self, uri: &Url) -> Option<u64> {
        let mut slots = self.lock_slots();
        let slot = slots.get_mut(uri)?;
        if slot.running.is_some() || slot.closed {
            return None;
        }
        slot.running = Some(slot.generation);
        slot.running
    }

    /// End the pass started at `generation`. Other passes are untouched.
    pub fn finish(&self, uri: &Url, generation: u64) {
        let mut slots = self.lock_slots();
        let Some(slot) = slots.get_mut(uri) else {
            return;
        };
        if slot.running != Some(generation) {
            return;
        }
        slot.running = None;
        if slot.closed {
            slots.remove(uri);
        }
    }

    /// Whether no trigger arrived for `uri` since `generation`
    pub fn is_current(&self, uri: &Url, generation: u64) -> bool {
        self.lock_slots()
            .get(uri)
            .is_some_and(|slot| !slot.closed && slot.generation == generation)
    }

    /// Forget `uri`. Pending timers and running passes become stale; a
    /// running pass keeps its slot until it finishes.
    pub fn remove(&self, uri: &Url) {
        let mut slots = self.lock_slots();
        let Some(slot) = slots.get_mut(uri) else {
            return;
        };
        if slot.running.is_none() {
            slots.remove(uri);
            return;
        }
        slot.closed = true;
        self.bump(slot);
    }
}
