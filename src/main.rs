//! appointment-chat - a terminal chat client for an appointment-scheduling agent.
//!
//! Built with Rust, Ratatui, and reqwest.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use appointment_chat::app::App;
use appointment_chat::backend::{BackendConfig, ChatBackend, HttpBackend};
use appointment_chat::config::{Cli, Config};
use appointment_chat::{input, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // File, then environment, then command line
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };
    config.apply_env_overrides();
    cli.apply_to(&mut config);

    let log_path = logging::init(&config.logging);

    let http = HttpBackend::new(BackendConfig::from_file(&config.backend));
    tracing::info!(
        endpoint = %http.describe(),
        user_id = %config.backend.user_id,
        log = ?log_path,
        "starting appointment-chat"
    );

    let mut app = App::new(Arc::new(http), &config);
    app.start_probe();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    // Without this, Shift+Enter arrives as a plain Enter
    app.keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if app.keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    tracing::info!(keyboard_enhanced = app.keyboard_enhanced, "terminal ready");
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = input::run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    if app.keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        eprintln!("Error: {:?}", err);
    }

    tracing::info!("exiting");
    Ok(())
}
