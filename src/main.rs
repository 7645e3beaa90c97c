mod animation;
mod app;
mod chain;
mod config;
mod error;
mod event;
mod geometry;
mod renderer;
mod ui;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::animation::Headless;
use crate::app::App;
use crate::config::{CliArgs, Config, Dimensions};
use crate::error::{ArrowError, ArrowResult};
use crate::event::{Event, EventHandler};
use crate::geometry::CommandRecorder;
use crate::renderer::ArrowRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let (config, created) = config::load(&cli)?;

    if let Some(dimensions) = cli.dump_frame {
        let json = dump_frame(&config, dimensions)?;
        println!("{json}");
        return Ok(());
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.log.as_deref(), &config.general.log_level)?;

    info!("linked-arrows starting");
    if let Some(path) = created {
        info!("Created default config at {}", path.display());
    }

    let mut event_handler = EventHandler::new();
    let mut app = App::new(&config, event_handler.sender())?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| ArrowError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if !cli.no_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // First frame
    app.renderer.request_redraw();

    // ── Main event loop ───────────────────────────────────────────────
    while let Some(event) = event_handler.next().await {
        match event {
            Event::Redraw => {
                terminal.draw(|f| ui::draw(f, &mut app))?;
            }
            other => app.handle_event(other),
        }

        if app.should_quit {
            break;
        }
    }
    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("linked-arrows exiting");
    Ok(())
}

/// Render one frame of the initial chain and serialize its draw commands
fn dump_frame(config: &Config, dimensions: Dimensions) -> ArrowResult<String> {
    let mut renderer = ArrowRenderer::new(config.widget()?, Headless);
    let mut recorder = CommandRecorder::new(dimensions.width as f32, dimensions.height as f32);
    renderer.render(&mut recorder);
    Ok(serde_json::to_string_pretty(&recorder)?)
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        // Call default handler
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file
fn init_logging(log_path: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    if let Some(path) = log_path {
        let file = std::fs::File::create(path)
            .wrap_err_with(|| format!("Failed to create log file {}", path.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
            )
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        // No logging if no log path specified (can't log to stdout in a TUI)
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_frame_lists_every_stroke() {
        let json = dump_frame(
            &Config::default(),
            Dimensions {
                width: 1080,
                height: 1920,
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["width"], 1080.0);
        let commands = value["commands"].as_array().unwrap();
        assert_eq!(commands[0]["op"], "clear");
        let lines = commands.iter().filter(|c| c["op"] == "line").count();
        assert_eq!(lines, 20);
    }

    #[test]
    fn test_dump_frame_rejects_invalid_config() {
        let mut config = Config::default();
        config.geometry.size_factor = -1.0;
        let dims = Dimensions {
            width: 10,
            height: 10,
        };
        assert!(matches!(
            dump_frame(&config, dims),
            Err(ArrowError::Config(_))
        ));
    }
}
