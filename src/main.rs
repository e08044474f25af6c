mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::AppConfig;
use controller::AppController;
use model::{AppModel, HttpCatalogClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== songs-rs Starting ===");

    let config = AppConfig::from_env();
    tracing::info!(api_base_url = %config.api_base_url, "Using catalog backend");

    let client = HttpCatalogClient::new(&config.api_base_url)
        .with_context(|| format!("could not create client for {}", config.api_base_url))?;

    let model = AppModel::new(Arc::new(client));
    let controller = AppController::new(model.clone());

    // Initial load runs in the background; the view shows "Loading songs..." until it lands
    let loader = controller.clone();
    tokio::spawn(async move {
        loader.load_all().await;
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("songs-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: AppModel,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let view_state = model.get_view_state().await;
        let ui_state = model.get_ui_state().await;

        terminal.draw(|f| {
            AppView::render(f, &view_state, &ui_state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
