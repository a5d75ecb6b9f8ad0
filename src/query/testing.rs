//! Test doubles for the query engine.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::oneshot;

use super::QueryClient;
use crate::api::{FetchOutcome, Fetcher, ResolvedRequest};

/// Fetcher that records requests and answers only when told to.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
  calls: Arc<Mutex<Vec<ResolvedRequest>>>,
  pending: Arc<Mutex<Vec<Option<oneshot::Sender<FetchOutcome>>>>>,
}

impl ScriptedFetcher {
  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }

  /// Request targets (`path?query`) in issue order
  pub fn targets(&self) -> Vec<String> {
    self.calls.lock().unwrap().iter().map(|r| r.target()).collect()
  }

  /// Answer the `index`-th request issued.
  pub fn resolve(&self, index: usize, outcome: FetchOutcome) {
    let tx = self.pending.lock().unwrap()[index]
      .take()
      .expect("request already resolved");
    let _ = tx.send(outcome);
  }
}

impl Fetcher for ScriptedFetcher {
  fn fetch(&self, request: ResolvedRequest) -> BoxFuture<'static, FetchOutcome> {
    let (tx, rx) = oneshot::channel();
    self.calls.lock().unwrap().push(request);
    self.pending.lock().unwrap().push(Some(tx));
    async move {
      rx.await
        .unwrap_or_else(|_| FetchOutcome::NetworkError("request dropped".to_string()))
    }
    .boxed()
  }
}

/// Let spawned fetches deliver their results, then apply them.
pub async fn settle(client: &QueryClient) -> bool {
  tokio::time::sleep(Duration::from_millis(10)).await;
  client.poll()
}
