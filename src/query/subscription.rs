use serde_json::Value;

use super::client::QueryClient;
use super::state::QuerySnapshot;
use crate::api::{CacheKey, EndpointDescriptor};

/// Per-subscription options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
  /// Never fetch for this subscription (e.g. until an id is known).
  /// The subscriber still sees whatever the cache already holds.
  pub skip_fetch: bool,
}

/// One consumer's view onto the cache.
///
/// Call [`bind`](Subscription::bind) with the current descriptor on every
/// render or tick; it is cheap when nothing changed. Dropping the
/// subscription detaches it from its entry.
pub struct Subscription {
  client: QueryClient,
  key: Option<CacheKey>,
  options: QueryOptions,
}

impl Subscription {
  pub(super) fn new(client: QueryClient, options: QueryOptions) -> Self {
    Self {
      client,
      key: None,
      options,
    }
  }

  /// Bind to `descriptor`, moving to a new entry if its key changed, and
  /// schedule a fetch if the entry is empty or stale.
  pub fn bind(&mut self, descriptor: &EndpointDescriptor) {
    let key = descriptor.cache_key();
    let skip_fetch = self.options.skip_fetch;
    let previous = self.key.take();

    self.client.with_inner(|inner| {
      if previous.as_ref() != Some(&key) {
        // Attach first so detaching cannot evict the entry being moved to
        inner.attach(&key, descriptor);
        if let Some(old) = &previous {
          inner.detach(old);
        }
      }
      if !skip_fetch {
        inner.ensure_fresh(&key);
      }
    });

    self.key = Some(key);
  }

  pub fn snapshot(&self) -> QuerySnapshot {
    match &self.key {
      Some(key) => self
        .client
        .with_inner(|inner| inner.snapshot(key, self.options.skip_fetch)),
      None => QuerySnapshot::default(),
    }
  }

  /// Force a re-fetch of the bound key, superseding any fetch in flight.
  ///
  /// Existing data stays visible until the new result lands. Returns false
  /// (and does nothing) when unbound or skipped.
  pub fn mutate(&self) -> bool {
    if self.options.skip_fetch {
      return false;
    }
    match &self.key {
      Some(key) => {
        self.client.with_inner(|inner| inner.start_fetch(key));
        true
      }
      None => false,
    }
  }

  /// Show `value` immediately, then revalidate.
  ///
  /// Does nothing and returns false when unbound or skipped; cached data is
  /// left untouched in that case.
  pub fn mutate_optimistic(&self, value: Value) -> bool {
    if self.options.skip_fetch {
      return false;
    }
    match &self.key {
      Some(key) => self.client.set_data(key, value) && self.mutate(),
      None => false,
    }
  }

  pub fn set_skip_fetch(&mut self, skip_fetch: bool) {
    self.options.skip_fetch = skip_fetch;
  }

  pub fn options(&self) -> QueryOptions {
    self.options
  }

  pub fn key(&self) -> Option<&CacheKey> {
    self.key.as_ref()
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    if let Some(key) = self.key.take() {
      self.client.try_with_inner(|inner| inner.detach(&key));
    }
  }
}

impl std::fmt::Debug for Subscription {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("key", &self.key)
      .field("options", &self.options)
      .finish_non_exhaustive()
  }
}
