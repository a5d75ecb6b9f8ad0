//! Serde-deserializable envelopes matching the route responses.
//!
//! Every list route answers `{ "<resource>": [...] }`. These types exist so
//! the resource hooks can unwrap to the bare collection.

use serde::{Deserialize, Deserializer};

use super::types::{Habit, Note, Notification, SavedWorkout, Task};

#[derive(Debug, Deserialize)]
pub struct HabitsResponse {
  #[serde(default)]
  pub habits: Vec<Habit>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationsResponse {
  #[serde(default)]
  pub notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
pub struct DeletedTasksResponse {
  #[serde(default)]
  pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct DeletedNotesResponse {
  #[serde(default)]
  pub notes: Vec<Note>,
}

#[derive(Debug, Deserialize)]
pub struct SavedWorkoutsResponse {
  #[serde(default)]
  pub workouts: Vec<SavedWorkout>,
}

/// Ids come back as numbers from some routes and strings from others.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Num(i64),
    Str(String),
  }

  Ok(match RawId::deserialize(deserializer)? {
    RawId::Num(n) => n.to_string(),
    RawId::Str(s) => s,
  })
}
