//! Cached, revalidating data access for REST endpoints.
//!
//! Inspired by SWR / TanStack Query. A [`QueryClient`] owns one cache store;
//! consumers hold [`Subscription`]s that bind to an [`EndpointDescriptor`]
//! and read [`QuerySnapshot`]s.
//!
//! # Example
//!
//! ```ignore
//! let client = QueryClient::new(Arc::new(fetcher), &config.cache);
//! let mut habits = client.subscribe(QueryOptions::default());
//!
//! // On every render: re-derive the descriptor and bind it.
//! habits.bind(&EndpointDescriptor::new("/api/habits").param("frequency", "daily"));
//!
//! // In event loop tick
//! if client.poll() {
//!     // Some entry changed, trigger re-render
//! }
//!
//! let snap = habits.snapshot();
//! match (&snap.data, snap.is_loading, snap.is_error) {
//!     (None, true, _) => render_skeleton(),
//!     (Some(data), _, true) => render_with_error_marker(data),
//!     (None, _, true) => render_error(),
//!     (Some(data), _, _) => render_data(data),
//!     (None, false, false) => render_empty(),
//! }
//!
//! // "r" pressed
//! habits.mutate();
//! ```

mod client;
mod state;
mod subscription;

#[cfg(test)]
pub mod testing;

pub use client::QueryClient;
pub use state::{EntryStatus, QuerySnapshot};
pub use subscription::{QueryOptions, Subscription};
