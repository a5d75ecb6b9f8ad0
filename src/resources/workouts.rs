use serde::Deserialize;
use serde_json::Value;

use super::page::{request_limit, Page};
use super::{Resource, ResourceQuery};
use crate::api::api_types::SavedWorkoutsResponse;
use crate::api::types::SavedWorkout;
use crate::api::EndpointDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedWorkoutsParams {
  pub limit: Option<u32>,
  pub skip_fetch: bool,
}

/// `GET /api/workouts/saved` → `{ workouts: [...] }`
pub struct SavedWorkouts;

impl Resource for SavedWorkouts {
  type Params = SavedWorkoutsParams;
  type Output = Page<SavedWorkout>;

  const NAME: &'static str = "saved workouts";

  fn descriptor(params: &SavedWorkoutsParams) -> EndpointDescriptor {
    EndpointDescriptor::new("/api/workouts/saved").param("limit", request_limit(params.limit))
  }

  fn skip_fetch(params: &SavedWorkoutsParams) -> bool {
    params.skip_fetch
  }

  fn adapt(
    params: &SavedWorkoutsParams,
    payload: &Value,
  ) -> Result<Page<SavedWorkout>, serde_json::Error> {
    let resp = SavedWorkoutsResponse::deserialize(payload)?;
    Ok(Page::from_overfetch(resp.workouts, params.limit))
  }
}

pub type SavedWorkoutsQuery = ResourceQuery<SavedWorkouts>;

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_unlimited_request_has_no_query() {
    let d = SavedWorkouts::descriptor(&SavedWorkoutsParams::default());
    assert_eq!(d.request_target(), "/api/workouts/saved");
  }

  #[test]
  fn test_adapt_unwraps_collection() {
    let params = SavedWorkoutsParams {
      limit: Some(1),
      skip_fetch: false,
    };
    let page = SavedWorkouts::adapt(
      &params,
      &json!({"workouts": [{"id": 1, "name": "Legs"}, {"id": 2, "name": "Arms"}]}),
    )
    .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Legs");
    assert!(page.has_more);
  }
}
