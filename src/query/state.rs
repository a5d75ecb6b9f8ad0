//! Cache entries and the snapshots subscribers read from them.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::api::{EndpointDescriptor, FetchError, FetchOutcome};

/// Lifecycle of a cache entry.
///
/// `Empty -> Loading -> {Ready, Errored}`, and back to `Loading` on every
/// revalidation. Entries leave the cache only through eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
  Empty,
  Loading,
  Ready,
  Errored,
}

/// Cached result for one cache key, shared by all its subscribers.
#[derive(Debug)]
pub struct CacheEntry {
  pub(super) descriptor: EndpointDescriptor,
  pub(super) data: Option<Arc<Value>>,
  pub(super) status: EntryStatus,
  pub(super) last_error: Option<FetchError>,
  pub(super) last_fetched_at: Option<DateTime<Utc>>,
  /// When the last fetch finished, successfully or not
  pub(super) settled_at: Option<DateTime<Utc>>,
  pub(super) invalidated: bool,
  /// Generation of the latest issued fetch; only that one may be applied.
  /// Drawn from a client-wide counter so a recreated entry never reuses one.
  pub(super) generation: u64,
  pub(super) subscribers: usize,
  /// Recency stamp for idle-entry eviction
  pub(super) last_used: u64,
}

impl CacheEntry {
  pub(super) fn new(descriptor: EndpointDescriptor) -> Self {
    Self {
      descriptor,
      data: None,
      status: EntryStatus::Empty,
      last_error: None,
      last_fetched_at: None,
      settled_at: None,
      invalidated: false,
      generation: 0,
      subscribers: 0,
      last_used: 0,
    }
  }

  pub(super) fn is_in_flight(&self) -> bool {
    self.status == EntryStatus::Loading
  }

  pub(super) fn is_stale(&self, now: DateTime<Utc>, stale_time: Duration) -> bool {
    if self.invalidated {
      return true;
    }
    match self.settled_at {
      Some(settled) => now - settled > stale_time,
      None => true,
    }
  }

  /// Whether a bind should schedule a fetch for this entry.
  pub(super) fn needs_fetch(&self, now: DateTime<Utc>, stale_time: Duration) -> bool {
    !self.is_in_flight() && self.is_stale(now, stale_time)
  }

  /// Mark a new fetch with `generation` as issued.
  pub(super) fn begin_fetch(&mut self, generation: u64) {
    self.generation = generation;
    self.status = EntryStatus::Loading;
    self.invalidated = false;
  }

  /// Apply a finished fetch. Returns false if a newer fetch superseded it.
  pub(super) fn apply(&mut self, generation: u64, outcome: FetchOutcome, now: DateTime<Utc>) -> bool {
    if generation != self.generation {
      return false;
    }

    match outcome.into_result() {
      Ok(value) => {
        self.data = Some(Arc::new(value));
        self.status = EntryStatus::Ready;
        self.last_error = None;
        self.last_fetched_at = Some(now);
      }
      Err(error) => {
        // Keep the last good data visible next to the error.
        self.status = EntryStatus::Errored;
        self.last_error = Some(error);
      }
    }
    self.settled_at = Some(now);
    true
  }

  pub(super) fn snapshot(&self, skip_fetch: bool) -> QuerySnapshot {
    QuerySnapshot {
      data: self.data.clone(),
      is_loading: !skip_fetch && self.is_in_flight(),
      is_error: self.status == EntryStatus::Errored,
      error: self.last_error.clone(),
      last_fetched_at: self.last_fetched_at,
    }
  }
}

/// What a subscriber sees of its bound entry.
///
/// `data` may be stale while `is_loading` is true (after `mutate()`), and is
/// kept as last-known-good while `is_error` is true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySnapshot {
  pub data: Option<Arc<Value>>,
  pub is_loading: bool,
  pub is_error: bool,
  pub error: Option<FetchError>,
  pub last_fetched_at: Option<DateTime<Utc>>,
}
