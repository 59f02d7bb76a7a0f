use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod client;
mod config;
mod handler;
mod page;
mod theme;
mod tui;
mod ui;

use app::App;
use config::Config;

/// Log to a file; stdout belongs to the TUI. Filter via `VEX_LOG`.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("vex-console");
    std::fs::create_dir_all(&log_dir)?;

    let file = tracing_appender::rolling::never(&log_dir, "vex-console.log");
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("VEX_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging()?;

    let config = Config::load().unwrap_or_default();
    info!(server = %config.server_url(), "starting vex console");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(&config);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    info!("vex console exited");
    result
}

async fn run(
    terminal: &mut tui::Tui,
    events: &mut tui::EventHandler,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event)?;
        }

        // Surface the in-flight request result once it settles.
        app.poll_pending().await;
    }
    Ok(())
}
