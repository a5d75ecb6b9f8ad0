use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key event in an input component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
  /// Buffer or cursor changed (or the key was swallowed)
  Consumed,
  Submitted(String),
  Cancelled,
  /// Key not handled, pass to next handler
  NotHandled,
}

/// Single-line text buffer with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
  chars: Vec<char>,
  cursor: usize,
}

impl TextInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn value(&self) -> String {
    self.chars.iter().collect()
  }

  pub fn clear(&mut self) {
    self.chars.clear();
    self.cursor = 0;
  }

  /// Cursor position in characters
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Esc => return InputResult::Cancelled,
      KeyCode::Enter => return InputResult::Submitted(self.value()),
      KeyCode::Char('a') | KeyCode::Home if ctrl || key.code == KeyCode::Home => self.cursor = 0,
      KeyCode::Char('e') | KeyCode::End if ctrl || key.code == KeyCode::End => {
        self.cursor = self.chars.len()
      }
      KeyCode::Char('u') if ctrl => {
        self.chars.drain(..self.cursor);
        self.cursor = 0;
      }
      KeyCode::Char('w') if ctrl => self.delete_word(),
      KeyCode::Char(_) if ctrl => return InputResult::NotHandled,
      KeyCode::Char(c) => {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
      }
      KeyCode::Backspace if self.cursor > 0 => {
        self.cursor -= 1;
        self.chars.remove(self.cursor);
      }
      KeyCode::Delete if self.cursor < self.chars.len() => {
        self.chars.remove(self.cursor);
      }
      KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
      KeyCode::Backspace | KeyCode::Delete => {}
      _ => return InputResult::NotHandled,
    }
    InputResult::Consumed
  }

  /// Remove trailing spaces and the word before the cursor
  fn delete_word(&mut self) {
    let mut start = self.cursor;
    while start > 0 && self.chars[start - 1] == ' ' {
      start -= 1;
    }
    while start > 0 && self.chars[start - 1] != ' ' {
      start -= 1;
    }
    self.chars.drain(start..self.cursor);
    self.cursor = start;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
  }

  fn typed(text: &str) -> TextInput {
    let mut input = TextInput::new();
    for c in text.chars() {
      input.handle_key(key(KeyCode::Char(c)));
    }
    input
  }

  #[test]
  fn test_typing_and_submit() {
    let mut input = typed("trash");
    assert_eq!(
      input.handle_key(key(KeyCode::Enter)),
      InputResult::Submitted("trash".to_string())
    );
  }

  #[test]
  fn test_editing_multibyte_text() {
    let mut input = typed("café");
    input.handle_key(key(KeyCode::Backspace));
    assert_eq!(input.value(), "caf");

    input.handle_key(key(KeyCode::Char('é')));
    input.handle_key(key(KeyCode::Left));
    input.handle_key(key(KeyCode::Left));
    input.handle_key(key(KeyCode::Delete));
    assert_eq!(input.value(), "caé");
    assert_eq!(input.cursor(), 2);
  }

  #[test]
  fn test_ctrl_w_deletes_previous_word() {
    let mut input = typed("saved workouts  ");
    input.handle_key(ctrl('w'));
    assert_eq!(input.value(), "saved ");
  }

  #[test]
  fn test_ctrl_u_clears_before_cursor() {
    let mut input = typed("habits");
    input.handle_key(key(KeyCode::Left));
    input.handle_key(key(KeyCode::Left));
    input.handle_key(ctrl('u'));
    assert_eq!(input.value(), "ts");
    assert_eq!(input.cursor(), 0);
  }

  #[test]
  fn test_unbound_ctrl_keys_pass_through() {
    let mut input = typed("x");
    assert_eq!(input.handle_key(ctrl('c')), InputResult::NotHandled);
    assert_eq!(input.value(), "x");
  }

  #[test]
  fn test_escape_cancels() {
    let mut input = typed("x");
    assert_eq!(input.handle_key(key(KeyCode::Esc)), InputResult::Cancelled);
  }
}
