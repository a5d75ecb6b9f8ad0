use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::commands::{self, Command};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

const MAX_SUGGESTIONS: usize = 6;

/// Events emitted by the command prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
  /// Canonical command name, or the raw input if nothing matched
  Submitted(String),
  Cancelled,
}

/// `:` prompt with autocomplete over [`commands::COMMANDS`]
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
  input: TextInput,
  active: bool,
  selected: usize,
}

impl CommandInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(&self.input.value())
  }

  /// Handles `:` while inactive and every key while active.
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<CommandEvent> {
    if !self.active {
      if key.code == KeyCode::Char(':') {
        self.reset(true);
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Tab | KeyCode::Down => self.cycle(1),
      KeyCode::BackTab | KeyCode::Up => self.cycle(-1),
      _ => match self.input.handle_key(key) {
        InputResult::Submitted(_) => {
          let command = self.resolve();
          self.reset(false);
          KeyResult::Event(CommandEvent::Submitted(command))
        }
        InputResult::Cancelled => {
          self.reset(false);
          KeyResult::Event(CommandEvent::Cancelled)
        }
        InputResult::Consumed => {
          self.selected = 0;
          KeyResult::Handled
        }
        // Swallow everything else so views never see keys typed at the prompt
        InputResult::NotHandled => KeyResult::Handled,
      },
    }
  }

  fn reset(&mut self, active: bool) {
    self.active = active;
    self.input.clear();
    self.selected = 0;
  }

  fn cycle(&mut self, step: isize) -> KeyResult<CommandEvent> {
    let count = self.suggestions().len().min(MAX_SUGGESTIONS);
    if count > 0 {
      self.selected = (self.selected as isize + step).rem_euclid(count as isize) as usize;
    }
    KeyResult::Handled
  }

  fn resolve(&self) -> String {
    match self.suggestions().get(self.selected) {
      Some(cmd) => cmd.name.to_string(),
      None => self.input.value().trim().to_lowercase(),
    }
  }

  /// Draw the prompt over the top of `area` when active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let suggestions = self.suggestions();
    let shown = suggestions.len().min(MAX_SUGGESTIONS);
    let width = (area.width / 2).clamp(30, 56).min(area.width);
    let height = (3 + shown as u16).min(area.height.saturating_sub(1));
    let overlay = Rect::new(area.x + 1, area.y + 1, width.saturating_sub(1), height);

    frame.render_widget(Clear, overlay);
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Go to ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    if inner.height == 0 {
      return;
    }

    let value = self.input.value();
    let prompt = Line::from(vec![
      Span::styled(":", Style::default().fg(Color::Yellow)),
      Span::raw(value),
      Span::styled("_", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(prompt), Rect { height: 1, ..inner });

    if shown == 0 || inner.height < 2 {
      return;
    }
    let items: Vec<ListItem> = suggestions
      .iter()
      .take(shown)
      .map(|cmd| {
        ListItem::new(Line::from(vec![
          Span::styled(format!("{:<15}", cmd.name), Style::default().fg(Color::Cyan)),
          Span::styled(cmd.description, Style::default().fg(Color::DarkGray)),
        ]))
      })
      .collect();
    let list_area = Rect {
      y: inner.y + 1,
      height: inner.height - 1,
      ..inner
    };
    let mut state = ListState::default().with_selected(Some(self.selected));
    frame.render_stateful_widget(
      List::new(items).highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White)),
      list_area,
      &mut state,
    );
  }
}
