use crate::api::types::{SavedWorkout, WorkoutExercise};
use crate::query::QueryClient;
use crate::resources::{SavedWorkoutsParams, SavedWorkoutsQuery};
use crate::ui::components::{DisplayState, KeyResult, ListEvent, ResourceList};
use crate::ui::view::{View, ViewAction};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, ListItem, Paragraph, Wrap};

/// Exercises of one saved workout.
///
/// Subscribes to the same list as the parent view, so it shares the cached
/// entry and picks up refreshed data. Falls back to the workout it was
/// opened with if it disappears from the list.
pub struct WorkoutDetailView {
  query: SavedWorkoutsQuery,
  opened: SavedWorkout,
  list: ResourceList,
}

impl WorkoutDetailView {
  pub fn new(client: &QueryClient, params: SavedWorkoutsParams, workout: SavedWorkout) -> Self {
    Self {
      query: SavedWorkoutsQuery::new(client, params),
      opened: workout,
      list: ResourceList::new(),
    }
  }

  fn current(&self) -> (SavedWorkout, DisplayState) {
    let result = self.query.snapshot();
    let state = DisplayState::Populated {
      error: result.error.clone().filter(|_| result.is_error),
      refreshing: result.is_loading,
    };
    let workout = result
      .data
      .items
      .into_iter()
      .find(|w| w.id == self.opened.id)
      .unwrap_or_else(|| self.opened.clone());
    (workout, state)
  }
}

fn format_exercise(exercise: &WorkoutExercise) -> String {
  let mut parts = Vec::new();
  match (exercise.sets, exercise.reps) {
    (Some(sets), Some(reps)) => parts.push(format!("{} x {}", sets, reps)),
    (Some(sets), None) => parts.push(format!("{} sets", sets)),
    (None, Some(reps)) => parts.push(format!("{} reps", reps)),
    (None, None) => {}
  }
  if let Some(weight) = exercise.weight {
    parts.push(format!("@ {}", weight));
  }
  parts.join(" ")
}

impl View for WorkoutDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.list.handle_key(key) {
      KeyResult::Event(ListEvent::Refresh) => {
        self.query.mutate();
        ViewAction::None
      }
      KeyResult::Event(ListEvent::Back) => ViewAction::Pop,
      _ => ViewAction::None,
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let (workout, state) = self.current();

    let description = workout.description.as_deref().unwrap_or("");
    let header_height = if description.is_empty() { 0 } else { 4 };
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(header_height), Constraint::Min(3)])
      .split(area);

    if header_height > 0 {
      let paragraph = Paragraph::new(description)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Description "));
      frame.render_widget(paragraph, chunks[0]);
    }

    let state = if workout.exercises.is_empty() {
      DisplayState::Empty
    } else {
      state
    };
    let items: Vec<ListItem> = workout
      .exercises
      .iter()
      .map(|exercise| {
        ListItem::new(Line::from(vec![
          Span::styled(format!("{:<28}", exercise.name), Style::default().fg(Color::White)),
          Span::styled(format_exercise(exercise), Style::default().fg(Color::Cyan)),
        ]))
      })
      .collect();

    self.list.render(frame, chunks[1], &workout.name, &state, items, true);
  }

  fn breadcrumb_label(&self) -> String {
    self.opened.name.clone()
  }

  fn tick(&mut self) {
    self.query.rebind();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn exercise(sets: Option<u32>, reps: Option<u32>, weight: Option<f64>) -> WorkoutExercise {
    WorkoutExercise {
      name: "Squat".to_string(),
      sets,
      reps,
      weight,
    }
  }

  #[test]
  fn test_format_exercise() {
    assert_eq!(format_exercise(&exercise(Some(5), Some(5), Some(100.0))), "5 x 5 @ 100");
    assert_eq!(format_exercise(&exercise(Some(3), None, None)), "3 sets");
    assert_eq!(format_exercise(&exercise(None, Some(12), Some(22.5))), "12 reps @ 22.5");
    assert_eq!(format_exercise(&exercise(None, None, None)), "");
  }
}
