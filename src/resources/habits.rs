use serde::Deserialize;
use serde_json::Value;

use super::{Resource, ResourceQuery};
use crate::api::api_types::HabitsResponse;
use crate::api::types::Habit;
use crate::api::EndpointDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitsParams {
  /// "daily", "weekly" or "monthly"
  pub frequency: Option<String>,
  pub active_only: Option<bool>,
  pub skip_fetch: bool,
}

/// `GET /api/habits` → `{ habits: [...] }`
pub struct Habits;

impl Resource for Habits {
  type Params = HabitsParams;
  type Output = Vec<Habit>;

  const NAME: &'static str = "habits";

  fn descriptor(params: &HabitsParams) -> EndpointDescriptor {
    EndpointDescriptor::new("/api/habits")
      .param("frequency", params.frequency.clone())
      .param("activeOnly", params.active_only)
  }

  fn skip_fetch(params: &HabitsParams) -> bool {
    params.skip_fetch
  }

  fn adapt(_params: &HabitsParams, payload: &Value) -> Result<Vec<Habit>, serde_json::Error> {
    Ok(HabitsResponse::deserialize(payload)?.habits)
  }
}

pub type HabitsQuery = ResourceQuery<Habits>;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::FetchOutcome;
  use crate::config::CacheConfig;
  use crate::query::testing::{settle, ScriptedFetcher};
  use crate::query::QueryClient;
  use serde_json::json;
  use std::sync::Arc;

  fn client(fetcher: &ScriptedFetcher) -> QueryClient {
    QueryClient::new(Arc::new(fetcher.clone()), &CacheConfig::default())
  }

  fn daily_active() -> HabitsParams {
    HabitsParams {
      frequency: Some("daily".to_string()),
      active_only: Some(true),
      skip_fetch: false,
    }
  }

  #[tokio::test]
  async fn test_filtered_habits_end_to_end() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let query = HabitsQuery::new(&client, daily_active());

    assert_eq!(
      fetcher.targets(),
      vec!["/api/habits?frequency=daily&activeOnly=true"]
    );

    fetcher.resolve(
      0,
      FetchOutcome::Success(json!({
        "habits": [
          {"id": 1, "name": "Meditate", "frequency": "daily"},
          {"id": 2, "name": "Stretch", "frequency": "daily"}
        ]
      })),
    );
    settle(&client).await;

    let result = query.snapshot();
    assert!(!result.is_loading);
    assert!(!result.is_error);
    assert!(result.has_data);
    let names: Vec<_> = result.data.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Meditate", "Stretch"]);
  }

  #[tokio::test]
  async fn test_absent_params_are_not_sent() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let _query = HabitsQuery::new(&client, HabitsParams::default());

    assert_eq!(fetcher.targets(), vec!["/api/habits"]);
  }

  #[tokio::test]
  async fn test_nothing_cached_defaults_to_empty() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let query = HabitsQuery::new(&client, daily_active());

    let result = query.snapshot();
    assert!(result.is_loading);
    assert!(result.data.is_empty());
    assert!(!result.has_data);
  }

  #[tokio::test]
  async fn test_changing_filter_fetches_new_key() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let mut query = HabitsQuery::new(&client, daily_active());
    fetcher.resolve(0, FetchOutcome::Success(json!({"habits": []})));
    settle(&client).await;

    query.set_params(HabitsParams {
      frequency: Some("weekly".to_string()),
      ..daily_active()
    });
    assert_eq!(fetcher.call_count(), 2);
    assert_eq!(
      fetcher.targets()[1],
      "/api/habits?frequency=weekly&activeOnly=true"
    );

    // Rebinding the same params is free.
    query.rebind();
    assert_eq!(fetcher.call_count(), 2);
  }

  #[tokio::test]
  async fn test_mutate_shows_old_data_until_new_arrives() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let query = HabitsQuery::new(&client, daily_active());
    fetcher.resolve(
      0,
      FetchOutcome::Success(json!({"habits": [{"id": "x", "name": "x"}]})),
    );
    settle(&client).await;

    assert!(query.mutate());
    let before = query.snapshot();
    assert!(before.is_loading);
    assert_eq!(before.data[0].id, "x");

    fetcher.resolve(
      1,
      FetchOutcome::Success(json!({"habits": [{"id": "y", "name": "y"}]})),
    );
    settle(&client).await;
    let after = query.snapshot();
    assert!(!after.is_loading);
    assert_eq!(after.data.len(), 1);
    assert_eq!(after.data[0].id, "y");
  }

  #[tokio::test]
  async fn test_unauthenticated_passes_error_through() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let query = HabitsQuery::new(&client, daily_active());
    fetcher.resolve(
      0,
      FetchOutcome::HttpError {
        status: 401,
        body: "Unauthorized".to_string(),
      },
    );
    settle(&client).await;

    let result = query.snapshot();
    assert!(result.is_error);
    assert!(result.data.is_empty());
    assert_eq!(result.error.as_deref(), Some("HTTP 401: Unauthorized"));
  }

  #[tokio::test]
  async fn test_wrong_shape_is_an_error() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let query = HabitsQuery::new(&client, daily_active());
    fetcher.resolve(0, FetchOutcome::Success(json!({"habits": "nope"})));
    settle(&client).await;

    let result = query.snapshot();
    assert!(result.is_error);
    assert!(!result.has_data);
    assert!(result.data.is_empty());
  }

  #[tokio::test]
  async fn test_skip_until_ready() {
    let fetcher = ScriptedFetcher::default();
    let client = client(&fetcher);
    let mut query = HabitsQuery::new(
      &client,
      HabitsParams {
        skip_fetch: true,
        ..daily_active()
      },
    );

    assert_eq!(fetcher.call_count(), 0);
    assert!(!query.snapshot().is_loading);

    query.set_params(daily_active());
    assert_eq!(fetcher.call_count(), 1);
  }
}
