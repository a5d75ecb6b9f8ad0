//! Trash: soft-deleted tasks and notes.

use serde::Deserialize;
use serde_json::Value;

use super::page::{request_limit, Page};
use super::{Resource, ResourceQuery};
use crate::api::api_types::{DeletedNotesResponse, DeletedTasksResponse};
use crate::api::types::{Note, Task};
use crate::api::EndpointDescriptor;

/// Params shared by both trash routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrashParams {
  pub limit: Option<u32>,
  /// Offset-style page number, passed through as-is
  pub page: Option<u32>,
  pub skip_fetch: bool,
}

fn trash_descriptor(path: &str, params: &TrashParams) -> EndpointDescriptor {
  EndpointDescriptor::new(path)
    .param("limit", request_limit(params.limit))
    .param("page", params.page)
}

/// `GET /api/tasks/deleted` → `{ tasks: [...] }`
pub struct DeletedTasks;

impl Resource for DeletedTasks {
  type Params = TrashParams;
  type Output = Page<Task>;

  const NAME: &'static str = "deleted tasks";

  fn descriptor(params: &TrashParams) -> EndpointDescriptor {
    trash_descriptor("/api/tasks/deleted", params)
  }

  fn skip_fetch(params: &TrashParams) -> bool {
    params.skip_fetch
  }

  fn adapt(params: &TrashParams, payload: &Value) -> Result<Page<Task>, serde_json::Error> {
    let resp = DeletedTasksResponse::deserialize(payload)?;
    Ok(Page::from_overfetch(resp.tasks, params.limit))
  }
}

/// `GET /api/notes/deleted` → `{ notes: [...] }`
pub struct DeletedNotes;

impl Resource for DeletedNotes {
  type Params = TrashParams;
  type Output = Page<Note>;

  const NAME: &'static str = "deleted notes";

  fn descriptor(params: &TrashParams) -> EndpointDescriptor {
    trash_descriptor("/api/notes/deleted", params)
  }

  fn skip_fetch(params: &TrashParams) -> bool {
    params.skip_fetch
  }

  fn adapt(params: &TrashParams, payload: &Value) -> Result<Page<Note>, serde_json::Error> {
    let resp = DeletedNotesResponse::deserialize(payload)?;
    Ok(Page::from_overfetch(resp.notes, params.limit))
  }
}

pub type DeletedTasksQuery = ResourceQuery<DeletedTasks>;
pub type DeletedNotesQuery = ResourceQuery<DeletedNotes>;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::FetchOutcome;
  use crate::config::CacheConfig;
  use crate::query::testing::{settle, ScriptedFetcher};
  use crate::query::QueryClient;
  use serde_json::json;
  use std::sync::Arc;

  #[tokio::test]
  async fn test_deleted_notes_limit_two() {
    let fetcher = ScriptedFetcher::default();
    let client = QueryClient::new(Arc::new(fetcher.clone()), &CacheConfig::default());
    let query = DeletedNotesQuery::new(
      &client,
      TrashParams {
        limit: Some(2),
        ..Default::default()
      },
    );
    assert_eq!(fetcher.targets(), vec!["/api/notes/deleted?limit=3"]);

    fetcher.resolve(
      0,
      FetchOutcome::Success(json!({
        "notes": [
          {"id": 1, "title": "a"},
          {"id": 2, "title": "b"},
          {"id": 3, "title": "c"}
        ]
      })),
    );
    settle(&client).await;

    let page = query.snapshot().data;
    assert_eq!(page.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.items[1].title, "b");
  }

  #[tokio::test]
  async fn test_tasks_and_notes_do_not_share_entries() {
    let fetcher = ScriptedFetcher::default();
    let client = QueryClient::new(Arc::new(fetcher.clone()), &CacheConfig::default());
    let params = TrashParams {
      limit: Some(10),
      page: Some(2),
      skip_fetch: false,
    };
    let _tasks = DeletedTasksQuery::new(&client, params.clone());
    let _notes = DeletedNotesQuery::new(&client, params);

    assert_eq!(
      fetcher.targets(),
      vec![
        "/api/tasks/deleted?limit=11&page=2",
        "/api/notes/deleted?limit=11&page=2"
      ]
    );
    assert_eq!(client.entry_count(), 2);
  }

  #[tokio::test]
  async fn test_skipped_notes_do_not_fetch() {
    let fetcher = ScriptedFetcher::default();
    let client = QueryClient::new(Arc::new(fetcher.clone()), &CacheConfig::default());
    let query = DeletedNotesQuery::new(
      &client,
      TrashParams {
        skip_fetch: true,
        ..Default::default()
      },
    );

    assert_eq!(fetcher.call_count(), 0);
    let result = query.snapshot();
    assert!(!result.is_loading);
    assert!(result.data.is_empty());
  }
}
