//! Typed resource hooks over the query engine.
//!
//! Each resource fixes a route, turns its own optional params into an
//! [`EndpointDescriptor`] and adapts the raw payload into a domain shape.
//! Hooks only read the cache and ask the engine to revalidate; they never
//! touch entries directly.

mod deleted;
mod habits;
mod notifications;
mod page;
mod workouts;

pub use deleted::{DeletedNotes, DeletedNotesQuery, DeletedTasks, DeletedTasksQuery, TrashParams};
pub use habits::{Habits, HabitsParams, HabitsQuery};
pub use notifications::{Notifications, NotificationsParams, NotificationsQuery};
pub use page::{request_limit, Page};
pub use workouts::{SavedWorkouts, SavedWorkoutsParams, SavedWorkoutsQuery};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::api::EndpointDescriptor;
use crate::query::{QueryClient, QueryOptions, Subscription};

/// A route plus the adapter from its payload to a domain shape.
pub trait Resource {
  type Params;
  /// Exposed when nothing is cached (empty collection / empty page)
  type Output: Default;

  /// Name used in logs and messages
  const NAME: &'static str;

  fn descriptor(params: &Self::Params) -> EndpointDescriptor;

  fn skip_fetch(params: &Self::Params) -> bool;

  fn adapt(params: &Self::Params, payload: &Value) -> Result<Self::Output, serde_json::Error>;
}

/// What a resource hook exposes to its consumer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceResult<T> {
  pub data: T,
  pub is_loading: bool,
  pub is_error: bool,
  pub error: Option<String>,
  /// Whether `data` came from a payload rather than the default
  pub has_data: bool,
  pub last_fetched_at: Option<DateTime<Utc>>,
}

/// A subscription specialised to one resource.
pub struct ResourceQuery<R: Resource> {
  subscription: Subscription,
  params: R::Params,
}

impl<R: Resource> ResourceQuery<R> {
  /// Subscribe and bind immediately, fetching unless `params` ask to skip.
  pub fn new(client: &QueryClient, params: R::Params) -> Self {
    let subscription = client.subscribe(QueryOptions {
      skip_fetch: R::skip_fetch(&params),
    });
    let mut query = Self {
      subscription,
      params,
    };
    query.rebind();
    query
  }

  /// Switch to new params. A changed key moves to (and maybe fetches) a new entry.
  pub fn set_params(&mut self, params: R::Params) {
    self.params = params;
    self.rebind();
  }

  /// Re-bind the current params so stale or invalidated data is refetched.
  /// Call on every tick.
  pub fn rebind(&mut self) {
    let skip_fetch = R::skip_fetch(&self.params);
    if self.subscription.options().skip_fetch != skip_fetch {
      self.subscription.set_skip_fetch(skip_fetch);
    }
    self.subscription.bind(&R::descriptor(&self.params));
  }

  pub fn params(&self) -> &R::Params {
    &self.params
  }

  pub fn mutate(&self) -> bool {
    self.subscription.mutate()
  }

  pub fn request_target(&self) -> String {
    R::descriptor(&self.params).request_target()
  }

  pub fn snapshot(&self) -> ResourceResult<R::Output> {
    let snap = self.subscription.snapshot();

    let (data, shape_error) = match snap.data.as_deref() {
      Some(payload) => match R::adapt(&self.params, payload) {
        Ok(data) => (data, None),
        Err(e) => {
          debug!(resource = R::NAME, error = %e, "unexpected payload shape");
          (
            R::Output::default(),
            Some(format!("unexpected {} response: {}", R::NAME, e)),
          )
        }
      },
      None => (R::Output::default(), None),
    };

    ResourceResult {
      has_data: snap.data.is_some() && shape_error.is_none(),
      is_error: snap.is_error || shape_error.is_some(),
      error: snap.error.map(|e| e.to_string()).or(shape_error),
      is_loading: snap.is_loading,
      last_fetched_at: snap.last_fetched_at,
      data,
    }
  }
}
