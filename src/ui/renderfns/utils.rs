use chrono::{DateTime, Utc};
use ratatui::prelude::Color;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Display color for a habit frequency
pub fn frequency_color(frequency: &str) -> Color {
  match frequency {
    "daily" => Color::Green,
    "weekly" => Color::Yellow,
    "monthly" => Color::Magenta,
    _ => Color::White,
  }
}

/// "just now", "5m ago", "3h ago", "2d ago"
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let secs = (now - at).num_seconds().max(0);
  match secs {
    0..=59 => "just now".to_string(),
    60..=3599 => format!("{}m ago", secs / 60),
    3600..=86399 => format!("{}h ago", secs / 3600),
    _ => format!("{}d ago", secs / 86400),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("ééééééééé", 5), "éé...");
  }

  #[test]
  fn test_frequency_color() {
    assert_eq!(frequency_color("daily"), Color::Green);
    assert_eq!(frequency_color("weekly"), Color::Yellow);
    assert_eq!(frequency_color("yearly"), Color::White);
  }

  #[test]
  fn test_format_relative() {
    let now = Utc::now();
    assert_eq!(format_relative(now, now), "just now");
    assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
    assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
    assert_eq!(format_relative(now - Duration::days(2), now), "2d ago");
  }
}
