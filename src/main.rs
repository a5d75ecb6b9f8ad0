mod api;
mod app;
mod commands;
mod config;
mod event;
mod query;
mod resources;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dayboard")]
#[command(about = "A terminal dashboard for habits, notifications, trash and saved workouts")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/dayboard/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Override the server base URL
  #[arg(short, long)]
  base_url: Option<String>,

  /// View to open on start
  #[arg(long, value_enum)]
  view: Option<app::StartView>,
}

/// Log to a file in the data directory; the terminal belongs to the UI.
///
/// Returns None (and logs nothing) when no data directory is available.
fn init_logging() -> Option<WorkerGuard> {
  let dir = dirs::data_dir()?.join("dayboard");
  std::fs::create_dir_all(&dir).ok()?;

  let appender = tracing_appender::rolling::never(&dir, "dayboard.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter =
    EnvFilter::try_from_env("DAYBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("dayboard=info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _log_guard = init_logging();

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Command line wins over the config file
  if let Some(base_url) = args.base_url {
    config.api.base_url = base_url;
  }
  if let Some(view) = args.view {
    config.default_view = view;
  }

  tracing::info!(base_url = %config.api.base_url, "starting");

  let fetcher = api::HttpFetcher::new(&config.api, config::Config::get_api_token())?;
  let client = query::QueryClient::new(Arc::new(fetcher), &config.cache);

  let mut app = app::App::new(config, client);
  app.run().await?;

  Ok(())
}
