use serde::{Deserialize, Serialize};

use super::api_types::deserialize_id;

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub frequency: String, // "daily", "weekly" or "monthly"
  #[serde(default = "default_true", alias = "active")]
  pub is_active: bool,
  #[serde(default)]
  pub current_streak: u32,
  #[serde(default)]
  pub created_at: Option<String>,
}

/// An in-app notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default, rename = "type")]
  pub kind: Option<String>,
  #[serde(default, alias = "read")]
  pub is_read: bool,
  #[serde(default, alias = "dismissed")]
  pub is_dismissed: bool,
  #[serde(default)]
  pub created_at: Option<String>,
}

/// A task, as listed in the trash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub priority: Option<String>,
  #[serde(default)]
  pub due_date: Option<String>,
  #[serde(default)]
  pub deleted_at: Option<String>,
}

/// A note, as listed in the trash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub content: Option<String>,
  #[serde(default)]
  pub deleted_at: Option<String>,
}

/// A saved workout template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub exercises: Vec<WorkoutExercise>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
  pub name: String,
  #[serde(default)]
  pub sets: Option<u32>,
  #[serde(default)]
  pub reps: Option<u32>,
  #[serde(default)]
  pub weight: Option<f64>,
}

fn default_true() -> bool {
  true
}
