use crate::config::TrashConfig;
use crate::query::QueryClient;
use crate::resources::{DeletedNotesQuery, DeletedTasksQuery, TrashParams};
use crate::ui::components::{display_state, KeyResult, ListEvent, ResourceList};
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::ListItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
  Tasks,
  Notes,
}

/// Deleted tasks and notes side by side.
///
/// The notes list does not fetch until it is focused for the first time.
pub struct TrashView {
  tasks: DeletedTasksQuery,
  notes: DeletedNotesQuery,
  tasks_list: ResourceList,
  notes_list: ResourceList,
  focus: Pane,
}

impl TrashView {
  pub fn new(client: &QueryClient, config: &TrashConfig) -> Self {
    let params = TrashParams {
      limit: Some(config.page_size),
      page: Some(1),
      skip_fetch: false,
    };

    Self {
      tasks: DeletedTasksQuery::new(client, params.clone()),
      notes: DeletedNotesQuery::new(
        client,
        TrashParams {
          skip_fetch: true,
          ..params
        },
      ),
      tasks_list: ResourceList::new(),
      notes_list: ResourceList::new(),
      focus: Pane::Tasks,
    }
  }

  fn switch_focus(&mut self) {
    self.focus = match self.focus {
      Pane::Tasks => Pane::Notes,
      Pane::Notes => Pane::Tasks,
    };

    if self.focus == Pane::Notes && self.notes.params().skip_fetch {
      let params = TrashParams {
        skip_fetch: false,
        ..self.notes.params().clone()
      };
      self.notes.set_params(params);
    }
  }

  /// Move the focused pane `delta` pages, never before page 1
  fn turn_page(&mut self, delta: i64) {
    fn next(params: &TrashParams, delta: i64) -> Option<TrashParams> {
      let current = params.page.unwrap_or(1);
      let page = (i64::from(current) + delta).max(1) as u32;
      (page != current).then(|| TrashParams {
        page: Some(page),
        ..params.clone()
      })
    }

    match self.focus {
      Pane::Tasks => {
        if let Some(params) = next(self.tasks.params(), delta) {
          self.tasks.set_params(params);
          self.tasks_list.reset();
        }
      }
      Pane::Notes => {
        if let Some(params) = next(self.notes.params(), delta) {
          self.notes.set_params(params);
          self.notes_list.reset();
        }
      }
    }
  }

  fn focused_list(&mut self) -> &mut ResourceList {
    match self.focus {
      Pane::Tasks => &mut self.tasks_list,
      Pane::Notes => &mut self.notes_list,
    }
  }

  fn refresh_focused(&self) {
    match self.focus {
      Pane::Tasks => self.tasks.mutate(),
      Pane::Notes => self.notes.mutate(),
    };
  }

  fn render_tasks(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.tasks.snapshot();
    let page = &result.data;
    let state = display_state(&result, page.len());
    let width = (area.width as usize).saturating_sub(16).max(8);

    let items: Vec<ListItem> = page
      .items
      .iter()
      .map(|task| {
        let priority = task.priority.as_deref().unwrap_or("-");
        ListItem::new(Line::from(vec![
          Span::styled(format!("{:<7}", priority), priority_style(priority)),
          Span::raw(truncate(&task.title, width)),
        ]))
      })
      .collect();

    let title = pane_title("Deleted tasks", self.tasks.params(), page.has_more);
    let focused = self.focus == Pane::Tasks;
    self.tasks_list.render(frame, area, &title, &state, items, focused);
  }

  fn render_notes(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.notes.snapshot();
    let page = &result.data;
    let state = display_state(&result, page.len());
    let width = (area.width as usize).saturating_sub(6).max(8);

    let items: Vec<ListItem> = page
      .items
      .iter()
      .map(|note| {
        let title = if note.title.is_empty() {
          Span::styled("(untitled)", Style::default().fg(Color::DarkGray))
        } else {
          Span::raw(truncate(&note.title, width))
        };
        ListItem::new(Line::from(title))
      })
      .collect();

    let title = pane_title("Deleted notes", self.notes.params(), page.has_more);
    let focused = self.focus == Pane::Notes;
    self.notes_list.render(frame, area, &title, &state, items, focused);
  }
}

fn pane_title(name: &str, params: &TrashParams, has_more: bool) -> String {
  let page = params.page.unwrap_or(1);
  if has_more {
    format!("{}, page {}+", name, page)
  } else {
    format!("{}, page {}", name, page)
  }
}

fn priority_style(priority: &str) -> Style {
  match priority {
    "high" | "urgent" => Style::default().fg(Color::Red),
    "medium" => Style::default().fg(Color::Yellow),
    "low" => Style::default().fg(Color::Green),
    _ => Style::default().fg(Color::DarkGray),
  }
}

impl View for TrashView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.focused_list().handle_key(key) {
      KeyResult::Event(ListEvent::Refresh) => {
        self.refresh_focused();
        return ViewAction::None;
      }
      KeyResult::Event(ListEvent::Back) => return ViewAction::Pop,
      KeyResult::Handled | KeyResult::Event(ListEvent::Selected(_)) => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
      KeyCode::Char('n') => self.turn_page(1),
      KeyCode::Char('p') => self.turn_page(-1),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
      .split(area);

    self.render_tasks(frame, chunks[0]);
    self.render_notes(frame, chunks[1]);
  }

  fn breadcrumb_label(&self) -> String {
    "Trash".to_string()
  }

  fn tick(&mut self) {
    self.tasks.rebind();
    self.notes.rebind();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("Tab", "switch"),
      ShortcutInfo::new("n/p", "page"),
    ]
  }
}
