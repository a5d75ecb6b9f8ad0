//! The shared cache store and its revalidation engine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use super::state::{CacheEntry, EntryStatus, QuerySnapshot};
use super::subscription::{QueryOptions, Subscription};
use crate::api::{CacheKey, EndpointDescriptor, FetchOutcome, Fetcher};
use crate::config::CacheConfig;

/// A finished fetch on its way back to the UI thread.
struct Completion {
  key: CacheKey,
  generation: u64,
  outcome: FetchOutcome,
}

/// Handle to one cache store.
///
/// Create it once at application start and hand clones to whoever needs to
/// subscribe. All state changes happen on the thread that owns the client:
/// fetches run on the tokio runtime, but their results are only applied in
/// [`QueryClient::poll`].
#[derive(Clone)]
pub struct QueryClient {
  inner: Rc<RefCell<Inner>>,
}

pub(super) struct Inner {
  fetcher: Arc<dyn Fetcher>,
  stale_time: Duration,
  max_idle_entries: usize,
  entries: HashMap<CacheKey, CacheEntry>,
  use_counter: u64,
  /// Last fetch generation handed out, across all entries
  generation_counter: u64,
  tx: mpsc::UnboundedSender<Completion>,
  rx: mpsc::UnboundedReceiver<Completion>,
}

impl QueryClient {
  pub fn new(fetcher: Arc<dyn Fetcher>, config: &CacheConfig) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      inner: Rc::new(RefCell::new(Inner {
        fetcher,
        stale_time: config.stale_time(),
        max_idle_entries: config.max_idle_entries,
        entries: HashMap::new(),
        use_counter: 0,
        generation_counter: 0,
        tx,
        rx,
      })),
    }
  }

  /// Create an unbound subscription. Bind it to a descriptor to start reading.
  pub fn subscribe(&self, options: QueryOptions) -> Subscription {
    Subscription::new(self.clone(), options)
  }

  /// Apply every fetch that finished since the last call.
  ///
  /// Returns `true` if any entry changed. Call this in your event loop tick.
  pub fn poll(&self) -> bool {
    let mut inner = self.inner.borrow_mut();
    let mut changed = false;
    while let Ok(completion) = inner.rx.try_recv() {
      changed |= inner.apply(completion);
    }
    changed
  }

  /// Mark every entry under `path_prefix` stale so its next bind refetches.
  pub fn invalidate(&self, path_prefix: &str) -> usize {
    let mut inner = self.inner.borrow_mut();
    let mut count = 0;
    for entry in inner.entries.values_mut() {
      if entry.descriptor.path().starts_with(path_prefix) {
        entry.invalidated = true;
        count += 1;
      }
    }
    debug!(prefix = path_prefix, count, "invalidated entries");
    count
  }

  /// Replace the cached data for a key without fetching.
  ///
  /// Used for optimistic updates; a fetch already in flight still wins when
  /// it lands. Returns false if the key is not cached.
  pub fn set_data(&self, key: &CacheKey, value: Value) -> bool {
    let mut inner = self.inner.borrow_mut();
    match inner.entries.get_mut(key) {
      Some(entry) => {
        entry.data = Some(Arc::new(value));
        if entry.status != EntryStatus::Loading {
          entry.status = EntryStatus::Ready;
        }
        true
      }
      None => false,
    }
  }

  #[cfg(test)]
  pub fn status(&self, key: &CacheKey) -> Option<EntryStatus> {
    self.inner.borrow().entries.get(key).map(|e| e.status)
  }

  /// Whether a subscribed entry last failed with 401/403
  pub fn has_auth_error(&self) -> bool {
    self
      .inner
      .borrow()
      .entries
      .values()
      .any(|e| e.subscribers > 0 && e.last_error.as_ref().is_some_and(|err| err.is_auth()))
  }

  pub fn entry_count(&self) -> usize {
    self.inner.borrow().entries.len()
  }

  /// Number of entries with a request on the wire
  pub fn in_flight_count(&self) -> usize {
    self
      .inner
      .borrow()
      .entries
      .values()
      .filter(|e| e.is_in_flight())
      .count()
  }

  pub(super) fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
    f(&mut self.inner.borrow_mut())
  }

  /// Like `with_inner`, but gives up instead of panicking if the store is
  /// already borrowed. Used from `Drop`.
  pub(super) fn try_with_inner(&self, f: impl FnOnce(&mut Inner)) {
    if let Ok(mut inner) = self.inner.try_borrow_mut() {
      f(&mut inner);
    }
  }
}

impl std::fmt::Debug for QueryClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let inner = self.inner.borrow();
    f.debug_struct("QueryClient")
      .field("entries", &inner.entries.len())
      .field("stale_time", &inner.stale_time)
      .field("max_idle_entries", &inner.max_idle_entries)
      .finish_non_exhaustive()
  }
}

impl Inner {
  /// Count a subscriber on `key`, creating the entry on first use.
  pub(super) fn attach(&mut self, key: &CacheKey, descriptor: &EndpointDescriptor) {
    self.use_counter += 1;
    let stamp = self.use_counter;
    let entry = self
      .entries
      .entry(key.clone())
      .or_insert_with(|| CacheEntry::new(descriptor.clone()));
    entry.subscribers += 1;
    entry.last_used = stamp;
  }

  pub(super) fn detach(&mut self, key: &CacheKey) {
    self.use_counter += 1;
    let stamp = self.use_counter;
    if let Some(entry) = self.entries.get_mut(key) {
      entry.subscribers = entry.subscribers.saturating_sub(1);
      entry.last_used = stamp;
      if entry.subscribers == 0 {
        self.evict_idle();
      }
    }
  }

  /// Drop least-recently-used entries nobody subscribes to, beyond the limit.
  fn evict_idle(&mut self) {
    let mut idle: Vec<(u64, CacheKey)> = self
      .entries
      .iter()
      .filter(|(_, e)| e.subscribers == 0)
      .map(|(k, e)| (e.last_used, k.clone()))
      .collect();

    if idle.len() <= self.max_idle_entries {
      return;
    }

    idle.sort();
    let excess = idle.len() - self.max_idle_entries;
    for (_, key) in idle.into_iter().take(excess) {
      trace!(key = %key, "evicting idle entry");
      self.entries.remove(&key);
    }
  }

  /// Schedule a fetch for `key` if it is empty or stale and nothing is in flight.
  pub(super) fn ensure_fresh(&mut self, key: &CacheKey) {
    let now = Utc::now();
    let needs_fetch = self
      .entries
      .get(key)
      .is_some_and(|e| e.needs_fetch(now, self.stale_time));
    if needs_fetch {
      self.start_fetch(key);
    }
  }

  /// Issue a fetch for `key` unconditionally. Any fetch already in flight
  /// for it is superseded.
  pub(super) fn start_fetch(&mut self, key: &CacheKey) {
    let Some(entry) = self.entries.get_mut(key) else {
      return;
    };

    self.generation_counter += 1;
    let generation = self.generation_counter;
    entry.begin_fetch(generation);
    let request = entry.descriptor.resolve();
    debug!(key = %key, generation, target = %request.target(), "fetch issued");

    let future = self.fetcher.fetch(request);
    let tx = self.tx.clone();
    let key = key.clone();
    tokio::spawn(async move {
      let outcome = future.await;
      // Ignore send errors - the client may have been dropped
      let _ = tx.send(Completion {
        key,
        generation,
        outcome,
      });
    });
  }

  pub(super) fn snapshot(&self, key: &CacheKey, skip_fetch: bool) -> QuerySnapshot {
    self
      .entries
      .get(key)
      .map(|e| e.snapshot(skip_fetch))
      .unwrap_or_default()
  }

  fn apply(&mut self, completion: Completion) -> bool {
    let Completion {
      key,
      generation,
      outcome,
    } = completion;

    let Some(entry) = self.entries.get_mut(&key) else {
      trace!(key = %key, generation, "discarding response for evicted entry");
      return false;
    };

    if let FetchOutcome::HttpError { status, body } = &outcome {
      warn!(key = %key, status, body = %body, "fetch failed");
    } else if let FetchOutcome::NetworkError(cause) = &outcome {
      warn!(key = %key, cause = %cause, "fetch failed");
    }

    if entry.apply(generation, outcome, Utc::now()) {
      debug!(key = %key, generation, status = ?entry.status, "fetch applied");
      true
    } else {
      trace!(key = %key, generation, current = entry.generation, "discarding superseded response");
      false
    }
  }
}
