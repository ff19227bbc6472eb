//! Full-frame rendering tests against ratatui's `TestBackend`.

use std::sync::Arc;

use async_trait::async_trait;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use appointment_chat::app::{App, BackendStatus};
use appointment_chat::backend::{BackendResult, ChatBackend, ChatRequest};
use appointment_chat::config::Config;
use appointment_chat::conversation::Reply;
use appointment_chat::ui::render::{PLACEHOLDER, RESET_LABEL, SENDING_LABEL, SEND_LABEL};
use appointment_chat::ui::ui;

struct SilentBackend;

#[async_trait]
impl ChatBackend for SilentBackend {
    async fn send_message(&self, _request: ChatRequest) -> BackendResult<String> {
        Ok(String::new())
    }

    fn describe(&self) -> String {
        "silent".to_string()
    }
}

fn new_app(config: &Config) -> App {
    let mut app = App::new(Arc::new(SilentBackend), config);
    app.backend_status = BackendStatus::Reachable;
    app
}

/// Push a user message and its reply without going through the network.
fn exchange(app: &mut App, text: &str, reply: &str) {
    app.conversation.set_input(text);
    let outgoing = app.conversation.submit().unwrap();
    app.conversation.complete(Reply {
        generation: outgoing.generation,
        result: Ok(reply.to_string()),
    });
}

fn draw(app: &mut App, config: &Config) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| ui(f, app, config)).unwrap();
    terminal.backend().buffer().clone()
}

fn rows(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer.get(x, y).symbol())
                .collect()
        })
        .collect()
}

fn screen_contains(buffer: &Buffer, needle: &str) -> bool {
    rows(buffer).iter().any(|row| row.contains(needle))
}

/// Column where `needle` starts on the first row containing it.
fn column_of(buffer: &Buffer, needle: &str) -> Option<usize> {
    rows(buffer).iter().find_map(|row| {
        row.find(needle)
            .map(|byte_idx| row[..byte_idx].chars().count())
    })
}

#[test]
fn initial_frame_shows_title_greeting_and_controls() {
    let config = Config::default();
    let mut app = new_app(&config);

    let buffer = draw(&mut app, &config);

    assert!(screen_contains(&buffer, "Appointment Agent"));
    assert!(screen_contains(&buffer, "I can help schedule appointments."));
    assert!(screen_contains(&buffer, PLACEHOLDER));
    assert!(screen_contains(&buffer, SEND_LABEL));
    assert!(screen_contains(&buffer, RESET_LABEL));
    assert!(screen_contains(&buffer, "● Ready"));
}

#[test]
fn header_reports_connecting_and_offline() {
    let config = Config::default();
    let mut app = App::new(Arc::new(SilentBackend), &config);

    let buffer = draw(&mut app, &config);
    assert!(screen_contains(&buffer, "● Connecting..."));

    app.backend_status = BackendStatus::Unreachable;
    let buffer = draw(&mut app, &config);
    assert!(screen_contains(&buffer, "● Offline"));
}

#[test]
fn send_control_shows_sending_while_request_is_outstanding() {
    let config = Config::default();
    let mut app = new_app(&config);
    app.conversation.set_input("I need to book");
    app.conversation.submit().unwrap();

    let buffer = draw(&mut app, &config);

    assert!(screen_contains(&buffer, SENDING_LABEL));
    assert!(!screen_contains(&buffer, SEND_LABEL));
    assert!(screen_contains(&buffer, "● Sending..."));
    // Input was cleared on submit
    assert!(screen_contains(&buffer, PLACEHOLDER));
}

#[test]
fn user_messages_sit_right_of_agent_messages() {
    let config = Config::default();
    let mut app = new_app(&config);
    exchange(&mut app, "I need to book", "Sure");

    let buffer = draw(&mut app, &config);

    let user_col = column_of(&buffer, "I need to book").unwrap();
    let agent_col = column_of(&buffer, "Sure").unwrap();
    assert!(user_col > 40, "user bubble at column {}", user_col);
    assert!(agent_col < 10, "agent bubble at column {}", agent_col);
}

#[test]
fn newest_message_is_visible_after_long_conversation() {
    let config = Config::default();
    let mut app = new_app(&config);
    for i in 0..10 {
        exchange(&mut app, &format!("question {}", i), &format!("reply {}", i));
    }

    let buffer = draw(&mut app, &config);

    assert!(screen_contains(&buffer, "reply 9"));
    assert!(!screen_contains(&buffer, "I can help schedule"));
    assert!(app.scroll.is_at_bottom());
}

#[test]
fn scrolling_up_survives_redraw_until_conversation_changes() {
    let config = Config::default();
    let mut app = new_app(&config);
    for i in 0..10 {
        exchange(&mut app, &format!("question {}", i), &format!("reply {}", i));
    }
    draw(&mut app, &config);

    app.scroll.scroll_to_top();
    let buffer = draw(&mut app, &config);
    assert!(screen_contains(&buffer, "I can help schedule"));
    assert_eq!(app.scroll.offset, 0);

    exchange(&mut app, "one more", "last reply");
    let buffer = draw(&mut app, &config);
    assert!(screen_contains(&buffer, "last reply"));
    assert!(app.scroll.is_at_bottom());
}

#[test]
fn controls_are_recorded_where_they_are_drawn() {
    let config = Config::default();
    let mut app = new_app(&config);

    let buffer = draw(&mut app, &config);

    let send = app.controls.send;
    let reset = app.controls.reset;
    assert!(send.width > 0 && reset.width > 0);
    assert_eq!(buffer.get(send.x, send.y).symbol(), "[");
    assert_eq!(buffer.get(reset.x, reset.y).symbol(), "[");
    assert!(app.controls.hits_send(send.x + 2, send.y));
    assert!(app.controls.hits_reset(reset.x + 2, reset.y));
    assert!(!app.controls.hits_send(0, 0));
}

#[test]
fn multiline_input_is_shown_on_separate_rows() {
    let config = Config::default();
    let mut app = new_app(&config);
    app.conversation.set_input("line one\nline two");

    let buffer = draw(&mut app, &config);

    let all = rows(&buffer);
    let first = all.iter().position(|r| r.contains("line one")).unwrap();
    let second = all.iter().position(|r| r.contains("line two")).unwrap();
    assert_eq!(second, first + 1);
}

#[test]
fn footer_hint_matches_keyboard_support() {
    let config = Config::default();
    let mut app = new_app(&config);

    // Plain terminals report Shift+Enter as Enter
    let buffer = draw(&mut app, &config);
    assert!(screen_contains(&buffer, "Alt+Enter newline"));
    assert!(!screen_contains(&buffer, "Shift+Enter"));

    app.keyboard_enhanced = true;
    let buffer = draw(&mut app, &config);
    assert!(screen_contains(&buffer, "Shift+Enter newline"));
}

#[test]
fn tabs_in_replies_are_drawn_as_spaces() {
    let config = Config::default();
    let mut app = new_app(&config);
    exchange(&mut app, "slots?", "A\tB");

    let buffer = draw(&mut app, &config);

    assert!(screen_contains(&buffer, " A   B "));
    assert!(rows(&buffer).iter().all(|row| !row.contains('\t')));
}
