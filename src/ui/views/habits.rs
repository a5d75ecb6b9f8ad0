use crate::config::HabitsConfig;
use crate::query::QueryClient;
use crate::resources::{HabitsParams, HabitsQuery};
use crate::ui::components::{display_state, KeyResult, ListEvent, ResourceList};
use crate::ui::renderfns::{format_relative, frequency_color, truncate};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::ListItem;

const FREQUENCIES: [Option<&str>; 4] = [None, Some("daily"), Some("weekly"), Some("monthly")];

/// Habits with their streaks, filterable by frequency
pub struct HabitsView {
  query: HabitsQuery,
  list: ResourceList,
}

impl HabitsView {
  pub fn new(client: &QueryClient, config: &HabitsConfig) -> Self {
    let params = HabitsParams {
      frequency: config.frequency.clone(),
      active_only: config.active_only.then_some(true),
      skip_fetch: false,
    };

    Self {
      query: HabitsQuery::new(client, params),
      list: ResourceList::new(),
    }
  }

  fn cycle_frequency(&mut self) {
    let mut params = self.query.params().clone();
    let current = FREQUENCIES
      .iter()
      .position(|f| *f == params.frequency.as_deref())
      .unwrap_or(0);
    params.frequency = FREQUENCIES[(current + 1) % FREQUENCIES.len()].map(str::to_string);
    self.apply(params);
  }

  fn toggle_active_only(&mut self) {
    let mut params = self.query.params().clone();
    params.active_only = match params.active_only {
      Some(true) => None,
      _ => Some(true),
    };
    self.apply(params);
  }

  fn apply(&mut self, params: HabitsParams) {
    self.query.set_params(params);
    self.list.reset();
  }

  fn title(&self) -> String {
    let params = self.query.params();
    let mut title = format!("Habits: {}", params.frequency.as_deref().unwrap_or("all"));
    if params.active_only == Some(true) {
      title.push_str(", active");
    }
    title
  }
}

impl View for HabitsView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.list.handle_key(key) {
      KeyResult::Event(ListEvent::Refresh) => {
        self.query.mutate();
        return ViewAction::None;
      }
      KeyResult::Event(ListEvent::Back) => return ViewAction::Pop,
      KeyResult::Handled | KeyResult::Event(ListEvent::Selected(_)) => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('f') => self.cycle_frequency(),
      KeyCode::Char('a') => self.toggle_active_only(),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.query.snapshot();
    let state = display_state(&result, result.data.len());
    let name_width = (area.width as usize).saturating_sub(30).max(10);

    let items: Vec<ListItem> = result
      .data
      .iter()
      .map(|habit| {
        let name_style = if habit.is_active {
          Style::default()
        } else {
          Style::default().fg(Color::DarkGray)
        };
        ListItem::new(Line::from(vec![
          Span::styled(
            format!("{:<9}", habit.frequency),
            Style::default().fg(frequency_color(&habit.frequency)),
          ),
          Span::styled(
            format!("{:>4}d ", habit.current_streak),
            Style::default().fg(Color::Cyan),
          ),
          Span::styled(truncate(&habit.name, name_width), name_style),
        ]))
      })
      .collect();

    let mut title = self.title();
    if let Some(at) = result.last_fetched_at {
      title.push_str(&format!(", updated {}", format_relative(at, Utc::now())));
    }
    self.list.render(frame, area, &title, &state, items, true);
  }

  fn breadcrumb_label(&self) -> String {
    "Habits".to_string()
  }

  fn tick(&mut self) {
    self.query.rebind();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("f", "frequency"),
      ShortcutInfo::new("a", "active only"),
    ]
  }
}
