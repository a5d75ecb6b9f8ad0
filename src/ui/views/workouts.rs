use crate::config::WorkoutsConfig;
use crate::query::QueryClient;
use crate::resources::{SavedWorkoutsParams, SavedWorkoutsQuery};
use crate::ui::components::{display_state, KeyResult, ListEvent, ResourceList};
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::WorkoutDetailView;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::ListItem;

pub struct WorkoutsView {
  client: QueryClient,
  query: SavedWorkoutsQuery,
  list: ResourceList,
}

impl WorkoutsView {
  pub fn new(client: &QueryClient, config: &WorkoutsConfig) -> Self {
    let params = SavedWorkoutsParams {
      limit: Some(config.page_size),
      skip_fetch: false,
    };

    Self {
      client: client.clone(),
      query: SavedWorkoutsQuery::new(client, params),
      list: ResourceList::new(),
    }
  }
}

impl View for WorkoutsView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.list.handle_key(key) {
      KeyResult::Event(ListEvent::Selected(idx)) => {
        let page = self.query.snapshot().data;
        match page.items.get(idx) {
          Some(workout) => ViewAction::Push(Box::new(WorkoutDetailView::new(
            &self.client,
            self.query.params().clone(),
            workout.clone(),
          ))),
          None => ViewAction::None,
        }
      }
      KeyResult::Event(ListEvent::Refresh) => {
        self.query.mutate();
        ViewAction::None
      }
      KeyResult::Event(ListEvent::Back) => ViewAction::Pop,
      KeyResult::Handled | KeyResult::NotHandled => ViewAction::None,
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.query.snapshot();
    let page = &result.data;
    let state = display_state(&result, page.len());
    let name_width = (area.width as usize).saturating_sub(20).max(10);

    let items: Vec<ListItem> = page
      .items
      .iter()
      .map(|workout| {
        ListItem::new(Line::from(vec![
          Span::styled(
            format!("{:>3} ex  ", workout.exercises.len()),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(truncate(&workout.name, name_width)),
        ]))
      })
      .collect();

    let title = if page.has_more {
      "Saved workouts, more available"
    } else {
      "Saved workouts"
    };
    self.list.render(frame, area, title, &state, items, true);
  }

  fn breadcrumb_label(&self) -> String {
    "Workouts".to_string()
  }

  fn tick(&mut self) {
    self.query.rebind();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![ShortcutInfo::new("Enter", "exercises")]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::FetchOutcome;
  use crate::config::CacheConfig;
  use crate::query::testing::{settle, ScriptedFetcher};
  use crossterm::event::{KeyCode, KeyModifiers};
  use serde_json::json;
  use std::sync::Arc;

  #[tokio::test]
  async fn test_detail_view_shares_the_cached_list() {
    let fetcher = ScriptedFetcher::default();
    let client = QueryClient::new(Arc::new(fetcher.clone()), &CacheConfig::default());
    let mut view = WorkoutsView::new(&client, &WorkoutsConfig { page_size: 25 });

    fetcher.resolve(
      0,
      FetchOutcome::Success(json!({
        "workouts": [{ "id": "w1", "name": "Legs", "exercises": [{ "name": "Squat", "sets": 5, "reps": 5 }] }]
      })),
    );
    assert!(settle(&client).await);
    assert_eq!(fetcher.targets(), vec!["/api/workouts/saved?limit=26"]);

    view.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
    let action = view.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let ViewAction::Push(mut detail) = action else {
      panic!("expected a detail view");
    };
    detail.tick();

    assert_eq!(detail.breadcrumb_label(), "Legs");
    assert_eq!(fetcher.call_count(), 1);
  }
}
