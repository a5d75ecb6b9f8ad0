pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Current view
      Constraint::Length(1), // Breadcrumb
    ])
    .split(frame.area());

  let mut shortcuts = view::global_shortcuts();
  if let Some(current) = app.current_view() {
    shortcuts.extend(current.shortcuts());
  }
  shortcuts.sort_by_key(|s| s.priority);

  renderfns::draw_header(
    frame,
    chunks[0],
    app.config().title.as_deref(),
    &app.config().api.base_url,
    app.client().in_flight_count(),
    &shortcuts,
  );

  if let Some(current) = app.current_view_mut() {
    current.render(frame, chunks[1]);
  }

  let status = app.status().or_else(|| {
    app
      .client()
      .has_auth_error()
      .then_some("session expired: check DAYBOARD_API_TOKEN")
  });
  renderfns::draw_footer(frame, chunks[2], &app.breadcrumb(), status);

  app.command().render_overlay(frame, chunks[1]);
}

/// Clamp a list selection to `len` items, selecting the first row when
/// nothing is selected yet.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  match (state.selected(), len) {
    (_, 0) => state.select(None),
    (None, _) => state.select(Some(0)),
    (Some(i), len) if i >= len => state.select(Some(len - 1)),
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_valid_selection() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(0));

    state.select(Some(7));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));

    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }
}
