use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInfo {
  pub key: &'static str,
  pub label: &'static str,
  pub priority: u8, // Lower = shown first
}

impl ShortcutInfo {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      priority: 100,
    }
  }

  pub const fn with_priority(mut self, priority: u8) -> Self {
    self.priority = priority;
    self
  }
}

/// Actions that a view can request in response to user input
pub enum ViewAction {
  /// No action needed
  None,
  /// Push a new view onto the stack
  Push(Box<dyn View>),
  /// Pop current view from stack (go back)
  Pop,
}

/// Trait for view behavior
///
/// Views own their resource queries. The App polls the shared query client
/// once per tick, then calls `tick()` on the current view so it can re-bind
/// its queries (which refetches stale or invalidated data).
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Get the breadcrumb label for this view
  fn breadcrumb_label(&self) -> String;

  /// Called on each tick
  fn tick(&mut self) {}

  /// View-specific shortcuts, merged with the global ones in the header
  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    Vec::new()
  }
}

/// Shortcuts every view supports
pub fn global_shortcuts() -> Vec<ShortcutInfo> {
  vec![
    ShortcutInfo::new(":", "command").with_priority(10),
    ShortcutInfo::new("r", "refresh").with_priority(20),
    ShortcutInfo::new("q", "back").with_priority(30),
  ]
}
