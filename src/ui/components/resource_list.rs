//! Shared list rendering for resource-backed views.

use super::KeyResult;
use crate::resources::ResourceResult;
use crate::ui::ensure_valid_selection;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// How a resource result should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
  /// First load, nothing to show yet
  Skeleton,
  /// Skipped and never loaded
  Idle,
  Empty,
  /// Failed with nothing cached
  Failed(String),
  /// Items to show, possibly stale next to an error or a refresh
  Populated {
    error: Option<String>,
    refreshing: bool,
  },
}

pub fn display_state<T>(result: &ResourceResult<T>, item_count: usize) -> DisplayState {
  let error = || {
    result
      .error
      .clone()
      .unwrap_or_else(|| "request failed".to_string())
  };

  if item_count > 0 {
    return DisplayState::Populated {
      error: result.is_error.then(error),
      refreshing: result.is_loading,
    };
  }

  if result.is_loading {
    DisplayState::Skeleton
  } else if result.is_error {
    DisplayState::Failed(error())
  } else if result.has_data {
    DisplayState::Empty
  } else {
    DisplayState::Idle
  }
}

/// Events a list hands back to its view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
  Selected(usize),
  Refresh,
  Back,
}

/// Bordered, selectable list with loading / empty / error placeholders
#[derive(Debug, Default)]
pub struct ResourceList {
  list_state: ListState,
}

impl ResourceList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn selected(&self) -> Option<usize> {
    self.list_state.selected()
  }

  /// Jump back to the first row (after a filter or page change)
  pub fn reset(&mut self) {
    self.list_state.select(None);
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<ListEvent> {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
        KeyResult::Handled
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
        KeyResult::Handled
      }
      KeyCode::Char('g') | KeyCode::Home => {
        self.list_state.select_first();
        KeyResult::Handled
      }
      KeyCode::Char('G') | KeyCode::End => {
        self.list_state.select_last();
        KeyResult::Handled
      }
      KeyCode::Enter => match self.list_state.selected() {
        Some(idx) => KeyResult::Event(ListEvent::Selected(idx)),
        None => KeyResult::Handled,
      },
      KeyCode::Char('r') => KeyResult::Event(ListEvent::Refresh),
      KeyCode::Char('q') | KeyCode::Esc => KeyResult::Event(ListEvent::Back),
      _ => KeyResult::NotHandled,
    }
  }

  pub fn render(
    &mut self,
    frame: &mut Frame,
    area: Rect,
    title: &str,
    state: &DisplayState,
    items: Vec<ListItem<'_>>,
    focused: bool,
  ) {
    let count = items.len();
    let suffix = match state {
      DisplayState::Skeleton => " (loading...)".to_string(),
      DisplayState::Failed(_) => " (error)".to_string(),
      DisplayState::Populated {
        error: Some(e), ..
      } => format!(" ({}, error: {})", count, e),
      DisplayState::Populated {
        refreshing: true, ..
      } => format!(" ({}, refreshing...)", count),
      _ => format!(" ({})", count),
    };

    let border = if focused { Color::Blue } else { Color::DarkGray };
    let block = Block::default()
      .title(format!(" {}{} ", title, suffix))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border));

    let placeholder = match state {
      DisplayState::Skeleton => Some(("Loading...".to_string(), Color::DarkGray)),
      DisplayState::Idle => Some(("Not loaded yet.".to_string(), Color::DarkGray)),
      DisplayState::Empty => Some(("Nothing here.".to_string(), Color::DarkGray)),
      DisplayState::Failed(e) => Some((format!("{}\n\nPress 'r' to retry.", e), Color::Red)),
      DisplayState::Populated { .. } => None,
    };

    if let Some((text, color)) = placeholder {
      let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(color));
      frame.render_widget(paragraph, area);
      return;
    }

    ensure_valid_selection(&mut self.list_state, count);

    let highlight = if focused {
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    let list = List::new(items)
      .block(block)
      .highlight_style(highlight)
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}
