use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use helpme_core::{Config, Router};

mod app;
mod avatar;
mod handler;
mod theme;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    // Config errors are reported before the terminal is taken over
    let config = Config::load()?;
    init_logging()?;
    info!(?config, "starting");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = run(&mut terminal, &config).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, config: &Config) -> Result<()> {
    let mut app = App::new(Router::new(config));
    let mut events = EventHandler::new(Duration::from_millis(config.tick_rate_ms));

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event)?,
            None => break,
        }
    }

    info!("exiting");
    Ok(())
}

/// Log to `<cache dir>/helpme/helpme.log`; the terminal owns stderr.
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=helpme_core=debug`.
fn init_logging() -> Result<()> {
    let log_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Could not determine cache directory"))?
        .join("helpme");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let log_path = log_dir.join("helpme.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("helpme=info,helpme_core=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();

    Ok(())
}
