use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, Terminal};

use crate::app::App;
use crate::config::Config;
use crate::ui;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running the app
    Continue,
    /// Exit the app
    Exit,
}

/// Cursor blink interval in milliseconds.
const CURSOR_BLINK_MS: u64 = 530;

/// Run the main application loop.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> io::Result<()> {
    let behavior = &config.behavior;
    let mut last_cursor_toggle = Instant::now();

    loop {
        // Apply replies that arrived since the last frame
        app.process_replies();
        app.process_probe();

        terminal.draw(|f| ui::ui(f, app, config))?;

        if last_cursor_toggle.elapsed() >= Duration::from_millis(CURSOR_BLINK_MS) {
            app.toggle_cursor();
            last_cursor_toggle = Instant::now();
        }

        if event::poll(Duration::from_millis(behavior.idle_poll_ms))? {
            let result = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Reset cursor to visible on any keypress
                    app.animation.cursor_visible = true;
                    last_cursor_toggle = Instant::now();
                    handle_key_event(app, key.code, key.modifiers, behavior.scroll_page_size)
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => HandleResult::Continue,
            };
            if result == HandleResult::Exit {
                return Ok(());
            }
        }
    }
}

/// Handle a key event and return whether to continue or exit.
///
/// Enter submits unless Shift or Alt is held, in which case a newline is
/// inserted instead. Shift is only reported when the terminal has keyboard
/// enhancement enabled; Alt works everywhere.
pub fn handle_key_event(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    page_size: usize,
) -> HandleResult {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => return HandleResult::Exit,
        KeyCode::Char('r') if ctrl => app.reset(),
        KeyCode::Enter => {
            if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) {
                app.conversation.insert_newline();
            } else {
                app.submit();
            }
        }
        KeyCode::Char(c) if !ctrl => app.conversation.insert_char(c),
        KeyCode::Backspace => app.conversation.backspace(),
        KeyCode::Delete => app.conversation.delete(),
        KeyCode::Left => app.conversation.move_cursor_left(),
        KeyCode::Right => app.conversation.move_cursor_right(),
        KeyCode::Home if ctrl => app.scroll.scroll_to_top(),
        KeyCode::End if ctrl => app.scroll.scroll_to_bottom(),
        KeyCode::Home => app.conversation.move_cursor_home(),
        KeyCode::End => app.conversation.move_cursor_end(),
        KeyCode::Up => app.scroll.scroll_up(),
        KeyCode::Down => app.scroll.scroll_down(),
        KeyCode::PageUp => app.scroll.scroll_page_up(page_size),
        KeyCode::PageDown => app.scroll.scroll_page_down(page_size),
        KeyCode::Esc => return HandleResult::Exit,
        _ => {}
    }
    HandleResult::Continue
}

/// Handle a mouse event: clicks on the controls and wheel scrolling.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> HandleResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.controls.hits_send(mouse.column, mouse.row) {
                app.click_send();
            } else if app.controls.hits_reset(mouse.column, mouse.row) {
                app.reset();
            }
        }
        MouseEventKind::ScrollUp => app.scroll.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll.scroll_down(),
        _ => {}
    }
    HandleResult::Continue
}
