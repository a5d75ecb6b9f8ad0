use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::app::StartView;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  /// Custom title for header (defaults to the server domain if not set)
  pub title: Option<String>,
  #[serde(default)]
  pub default_view: StartView,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub habits: HabitsConfig,
  #[serde(default)]
  pub notifications: NotificationsConfig,
  #[serde(default)]
  pub trash: TrashConfig,
  #[serde(default)]
  pub workouts: WorkoutsConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
  /// `Authorization: Bearer <token>`
  #[default]
  Bearer,
  /// Session cookie, as the web app's own pages send it
  Cookie,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  pub base_url: String,
  #[serde(default)]
  pub auth_type: AuthType,
  /// Cookie name used with `auth_type: cookie`
  #[serde(default = "default_cookie_name")]
  pub cookie_name: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:3000".to_string(),
      auth_type: AuthType::default(),
      cookie_name: default_cookie_name(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

fn default_cookie_name() -> String {
  "session".to_string()
}

fn default_timeout_secs() -> u64 {
  15
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// How long before cached data is considered stale
  #[serde(default = "default_stale_time_secs")]
  pub stale_time_secs: u64,
  /// Entries nobody subscribes to that are kept around (0 = drop immediately)
  #[serde(default = "default_max_idle_entries")]
  pub max_idle_entries: usize,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      stale_time_secs: default_stale_time_secs(),
      max_idle_entries: default_max_idle_entries(),
    }
  }
}

impl CacheConfig {
  pub fn stale_time(&self) -> chrono::Duration {
    let secs = i64::try_from(self.stale_time_secs).unwrap_or(i64::MAX);
    chrono::Duration::seconds(secs.min(i64::MAX / 1000))
  }
}

fn default_stale_time_secs() -> u64 {
  300
}

fn default_max_idle_entries() -> usize {
  32
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitsConfig {
  /// Initial frequency filter ("daily", "weekly", "monthly")
  pub frequency: Option<String>,
  #[serde(default)]
  pub active_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
  #[serde(default = "default_notifications_page_size")]
  pub page_size: u32,
  #[serde(default)]
  pub include_read: bool,
  #[serde(default)]
  pub include_dismissed: bool,
}

impl Default for NotificationsConfig {
  fn default() -> Self {
    Self {
      page_size: default_notifications_page_size(),
      include_read: false,
      include_dismissed: false,
    }
  }
}

fn default_notifications_page_size() -> u32 {
  20
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrashConfig {
  #[serde(default = "default_trash_page_size")]
  pub page_size: u32,
}

impl Default for TrashConfig {
  fn default() -> Self {
    Self {
      page_size: default_trash_page_size(),
    }
  }
}

fn default_trash_page_size() -> u32 {
  10
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutsConfig {
  #[serde(default = "default_workouts_page_size")]
  pub page_size: u32,
}

impl Default for WorkoutsConfig {
  fn default() -> Self {
    Self {
      page_size: default_workouts_page_size(),
    }
  }
}

fn default_workouts_page_size() -> u32 {
  25
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./dayboard.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/dayboard/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/dayboard/config.yaml\n\
                 with at least `api: {{ base_url: https://your-app.example.com }}`."
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("dayboard.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("dayboard").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Get the API token (bearer token or session cookie value).
  ///
  /// Reads DAYBOARD_API_TOKEN; the web app may allow anonymous reads, so a
  /// missing token is not an error here.
  pub fn get_api_token() -> Option<String> {
    std::env::var("DAYBOARD_API_TOKEN")
      .ok()
      .filter(|t| !t.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config = Config::parse("api:\n  base_url: https://app.example.com\n").unwrap();
    assert_eq!(config.api.auth_type, AuthType::Bearer);
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.cache.stale_time_secs, 300);
    assert_eq!(config.cache.max_idle_entries, 32);
    assert_eq!(config.notifications.page_size, 20);
    assert_eq!(config.trash.page_size, 10);
    assert_eq!(config.default_view, StartView::Habits);
  }

  #[test]
  fn test_full_config() {
    let yaml = r#"
title: My day
default_view: trash
api:
  base_url: https://app.example.com
  auth_type: cookie
  cookie_name: sid
  timeout_secs: 5
cache:
  stale_time_secs: 60
  max_idle_entries: 0
habits:
  frequency: daily
  active_only: true
notifications:
  page_size: 5
  include_read: true
"#;
    let config = Config::parse(yaml).unwrap();
    assert_eq!(config.title.as_deref(), Some("My day"));
    assert_eq!(config.default_view, StartView::Trash);
    assert_eq!(config.api.auth_type, AuthType::Cookie);
    assert_eq!(config.api.cookie_name, "sid");
    assert_eq!(config.cache.stale_time(), chrono::Duration::seconds(60));
    assert_eq!(config.habits.frequency.as_deref(), Some("daily"));
    assert!(config.habits.active_only);
    assert!(config.notifications.include_read);
    assert!(!config.notifications.include_dismissed);
  }

  #[test]
  fn test_missing_api_section_is_an_error() {
    assert!(Config::parse("title: nope\n").is_err());
  }

  #[test]
  fn test_load_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api:\n  base_url: http://localhost:4000").unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:4000");
  }

  #[test]
  fn test_load_missing_explicit_path() {
    let err = Config::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }
}
