use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::query::QueryClient;
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{HabitsView, NotificationsView, TrashView, WorkoutsView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use serde::Deserialize;
use std::io::stdout;
use std::time::Duration;
use tracing::{debug, info};

/// Root views reachable from the command prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
  #[default]
  Habits,
  Notifications,
  Trash,
  Workouts,
}

impl StartView {
  /// Map a canonical command name to its view
  pub fn from_command(name: &str) -> Option<Self> {
    match name {
      "habits" => Some(Self::Habits),
      "notifications" => Some(Self::Notifications),
      "trash" => Some(Self::Trash),
      "workouts" => Some(Self::Workouts),
      _ => None,
    }
  }
}

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  command: CommandInput,

  config: Config,

  /// Shared cache every view subscribes through
  client: QueryClient,

  /// Message shown in the footer until the next key press
  status: Option<String>,

  should_quit: bool,
}

impl App {
  pub fn new(config: Config, client: QueryClient) -> Self {
    let mut app = Self {
      view_stack: Vec::new(),
      command: CommandInput::new(),
      config,
      client,
      status: None,
      should_quit: false,
    };
    app.open_root(app.config.default_view);
    app
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(100));
    let result = self.event_loop(&mut terminal, &mut events).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => self.tick(),
      Event::Resize => {} // Redrawn on the next loop iteration
    }
  }

  /// Apply finished fetches, then let the current view re-bind its queries
  pub fn tick(&mut self) {
    self.client.poll();
    if let Some(view) = self.view_stack.last_mut() {
      view.tick();
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    self.status = None;

    match self.command.handle_key(key) {
      KeyResult::Handled | KeyResult::Event(CommandEvent::Cancelled) => return,
      KeyResult::Event(CommandEvent::Submitted(cmd)) => {
        self.execute_command(&cmd);
        return;
      }
      KeyResult::NotHandled => {}
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    let Some(view) = self.view_stack.last_mut() else {
      return;
    };
    match view.handle_key(key) {
      ViewAction::None => {}
      ViewAction::Push(next) => self.view_stack.push(next),
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    match cmd {
      "quit" => {
        self.should_quit = true;
        return;
      }
      "reload" => {
        let count = self.client.invalidate("/");
        // Views pick the invalidation up when they re-bind on the next tick
        self.status = Some(format!("reloading {} cached queries", count));
        return;
      }
      _ => {}
    }

    match StartView::from_command(cmd) {
      Some(view) => self.open_root(view),
      None => {
        debug!(command = cmd, "unknown command");
        self.status = Some(format!("unknown command: {}", cmd));
      }
    }
  }

  /// Replace the whole stack with a fresh root view
  fn open_root(&mut self, view: StartView) {
    info!(view = ?view, "opening view");
    // Drop the old views first so their subscriptions detach before new ones attach
    self.view_stack.clear();
    let root: Box<dyn View> = match view {
      StartView::Habits => Box::new(HabitsView::new(&self.client, &self.config.habits)),
      StartView::Notifications => Box::new(NotificationsView::new(
        &self.client,
        &self.config.notifications,
      )),
      StartView::Trash => Box::new(TrashView::new(&self.client, &self.config.trash)),
      StartView::Workouts => Box::new(WorkoutsView::new(&self.client, &self.config.workouts)),
    };
    self.view_stack.push(root);
  }

  pub fn current_view(&self) -> Option<&dyn View> {
    self.view_stack.last().map(|v| v.as_ref())
  }

  pub fn current_view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
    self.view_stack.last_mut().map(|v| v.as_mut())
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self.view_stack.iter().map(|v| v.breadcrumb_label()).collect()
  }

  pub fn command(&self) -> &CommandInput {
    &self.command
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn client(&self) -> &QueryClient {
    &self.client
  }

  pub fn status(&self) -> Option<&str> {
    self.status.as_deref()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ApiConfig;
  use crate::query::testing::ScriptedFetcher;
  use std::sync::Arc;

  fn app(default_view: StartView) -> (App, ScriptedFetcher) {
    let fetcher = ScriptedFetcher::default();
    let config = Config {
      api: ApiConfig::default(),
      title: None,
      default_view,
      cache: Default::default(),
      habits: Default::default(),
      notifications: Default::default(),
      trash: Default::default(),
      workouts: Default::default(),
    };
    let client = QueryClient::new(Arc::new(fetcher.clone()), &config.cache);
    (App::new(config, client), fetcher)
  }

  fn press(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
  }

  fn run_command(app: &mut App, cmd: &str) {
    press(app, ':');
    for c in cmd.chars() {
      press(app, c);
    }
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
  }

  #[tokio::test]
  async fn test_starts_on_configured_view() {
    let (app, fetcher) = app(StartView::Notifications);
    assert_eq!(app.breadcrumb(), vec!["Notifications"]);
    assert_eq!(
      fetcher.targets(),
      vec!["/api/notifications?limit=21"]
    );
  }

  #[tokio::test]
  async fn test_command_replaces_root_view() {
    let (mut app, fetcher) = app(StartView::Habits);
    run_command(&mut app, "wor");

    assert_eq!(app.breadcrumb(), vec!["Workouts"]);
    assert_eq!(fetcher.targets()[1], "/api/workouts/saved?limit=26");
    // The habits entry stays cached while idle
    assert_eq!(app.client().entry_count(), 2);
  }

  #[tokio::test]
  async fn test_unknown_command_sets_status() {
    let (mut app, _fetcher) = app(StartView::Habits);
    run_command(&mut app, "zzz");

    assert_eq!(app.status(), Some("unknown command: zzz"));
    assert_eq!(app.breadcrumb(), vec!["Habits"]);

    press(&mut app, 'j');
    assert_eq!(app.status(), None);
  }

  #[tokio::test]
  async fn test_q_on_root_quits() {
    let (mut app, _fetcher) = app(StartView::Trash);
    press(&mut app, 'q');
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_reload_refetches_current_view() {
    let (mut app, fetcher) = app(StartView::Habits);
    fetcher.resolve(0, crate::api::FetchOutcome::Success(serde_json::json!({ "habits": [] })));
    assert!(crate::query::testing::settle(app.client()).await);

    run_command(&mut app, "reload");
    assert_eq!(app.status(), Some("reloading 1 cached queries"));
    assert_eq!(fetcher.call_count(), 1);

    app.tick();
    assert_eq!(fetcher.targets(), vec!["/api/habits", "/api/habits"]);
  }

  #[test]
  fn test_start_view_from_command() {
    assert_eq!(StartView::from_command("trash"), Some(StartView::Trash));
    assert_eq!(StartView::from_command("quit"), None);
  }
}
