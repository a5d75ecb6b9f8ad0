use crate::config::NotificationsConfig;
use crate::query::QueryClient;
use crate::resources::{NotificationsParams, NotificationsQuery};
use crate::ui::components::{display_state, KeyResult, ListEvent, ResourceList};
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::ListItem;

/// The most recent notifications, unread and undismissed by default
pub struct NotificationsView {
  query: NotificationsQuery,
  list: ResourceList,
}

/// `Some(true)` or absent, never an explicit `false`
fn flag(on: bool) -> Option<bool> {
  on.then_some(true)
}

impl NotificationsView {
  pub fn new(client: &QueryClient, config: &NotificationsConfig) -> Self {
    let params = NotificationsParams {
      limit: Some(config.page_size),
      include_read: flag(config.include_read),
      include_dismissed: flag(config.include_dismissed),
      skip_fetch: false,
    };

    Self {
      query: NotificationsQuery::new(client, params),
      list: ResourceList::new(),
    }
  }

  fn update(&mut self, f: impl FnOnce(&mut NotificationsParams)) {
    let mut params = self.query.params().clone();
    f(&mut params);
    self.query.set_params(params);
    self.list.reset();
  }
}

impl View for NotificationsView {
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
      KeyCode::Char('R') => self.update(|p| p.include_read = flag(p.include_read != Some(true))),
      KeyCode::Char('D') => {
        self.update(|p| p.include_dismissed = flag(p.include_dismissed != Some(true)))
      }
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.query.snapshot();
    let page = &result.data;
    let state = display_state(&result, page.len());
    let title_width = (area.width as usize).saturating_sub(20).max(10);

    let items: Vec<ListItem> = page
      .items
      .iter()
      .map(|n| {
        let marker = match (n.is_read, n.is_dismissed) {
          (_, true) => Span::styled("x ", Style::default().fg(Color::DarkGray)),
          (false, _) => Span::styled("● ", Style::default().fg(Color::Yellow)),
          (true, _) => Span::raw("  "),
        };
        let mut spans = vec![
          marker,
          Span::styled(
            format!("{:<10}", n.kind.as_deref().unwrap_or("info")),
            Style::default().fg(Color::Magenta),
          ),
          Span::raw(truncate(&n.title, title_width)),
        ];
        if let Some(message) = n.message.as_deref().filter(|m| !m.is_empty()) {
          spans.push(Span::styled(
            format!("  {}", truncate(message, title_width / 2)),
            Style::default().fg(Color::DarkGray),
          ));
        }
        ListItem::new(Line::from(spans))
      })
      .collect();

    let params = self.query.params();
    let mut title = "Notifications".to_string();
    if params.include_read == Some(true) {
      title.push_str(" +read");
    }
    if params.include_dismissed == Some(true) {
      title.push_str(" +dismissed");
    }
    if page.has_more {
      title.push_str(", more available");
    }
    self.list.render(frame, area, &title, &state, items, true);
  }

  fn breadcrumb_label(&self) -> String {
    "Notifications".to_string()
  }

  fn tick(&mut self) {
    self.query.rebind();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("R", "read"),
      ShortcutInfo::new("D", "dismissed"),
    ]
  }
}
