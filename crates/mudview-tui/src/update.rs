//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyEventKind};
use tracing::{debug, info};

use crate::effects::UiEffect;
use crate::events::{ConnectionEvent, UiEvent};
use crate::state::{AppState, ConnectionStatus};
use crate::{input, log, render};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Connection(conn_event) => {
            handle_connection_event(app, conn_event);
            vec![]
        }
    }
}

/// Refreshes scroll metrics for the current terminal size.
fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    let (text_width, log_height) = render::log_viewport(width, height);
    let lines = log::line_count(app.view.log(), text_width);
    app.scroll.update_metrics(lines, log_height);
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if log::handle_scroll_key(&mut app.scroll, &key) {
                return vec![];
            }
            input::handle_key(app, key)
        }
        Event::Paste(text) => {
            input::handle_paste(app, &text);
            vec![]
        }
        Event::Mouse(mouse) => {
            log::handle_mouse(&mut app.scroll, &mouse);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_connection_event(app: &mut AppState, event: ConnectionEvent) {
    match event {
        ConnectionEvent::Connected => {
            info!(url = %app.server_url, "Connected");
            app.connection = ConnectionStatus::Connected;
            let notice = format!("Connected to {}.", app.server_url);
            app.push_system_line(&notice);
        }
        ConnectionEvent::Payload(text) => {
            let dispatch = app.view.handle(text);
            debug!(kind = ?dispatch.kind, appended = dispatch.appended, "Server message");
        }
        ConnectionEvent::Closed { reason } => {
            let notice = match &reason {
                Some(r) => format!("Connection closed by server: {r}"),
                None => "Connection closed by server.".to_string(),
            };
            app.connection = ConnectionStatus::Disconnected {
                reason: reason.unwrap_or_else(|| "closed".to_string()),
            };
            app.push_system_line(&notice);
        }
        ConnectionEvent::Failed { error } => {
            app.push_system_line(&format!("Connection lost: {error}"));
            app.connection = ConnectionStatus::Disconnected { reason: error };
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use mudview_core::{ClientView, PromptMode};

    use super::*;

    fn app() -> AppState {
        let mut app = AppState::new(ClientView::default(), "ws://localhost/ws");
        update(&mut app, UiEvent::Connection(ConnectionEvent::Connected));
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(app, key(KeyCode::Char(ch)));
        }
    }

    fn server(app: &mut AppState, payload: &str) {
        update(
            app,
            UiEvent::Connection(ConnectionEvent::Payload(payload.to_string())),
        );
    }

    fn last_log_text(app: &AppState) -> Option<String> {
        app.view.log().last().map(|e| e.plain_text())
    }

    #[test]
    fn test_enter_sends_trimmed_command() {
        let mut app = app();
        type_text(&mut app, "  kill rat ");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![UiEffect::SendCommand("kill rat".to_string())]);
        assert!(app.input.is_empty());
        assert_eq!(app.input.history.len(), 1);
    }

    #[test]
    fn test_enter_on_blank_input_does_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.input.text(), "   ");
    }

    #[test]
    fn test_password_is_masked_and_not_recorded() {
        let mut app = app();
        server(&mut app, r#"{"type":"PWD_MODE","content":"Password:"}"#);
        assert_eq!(app.view.prompt_mode(), PromptMode::Masked);
        assert_eq!(last_log_text(&app).as_deref(), Some("Password:"));

        type_text(&mut app, "secret");
        assert_eq!(input::display_text(app.input.text(), app.view.prompt_mode()), "******");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![UiEffect::SendCommand("secret".to_string())]);
        assert!(app.input.history.is_empty());

        server(&mut app, r#"{"type":"USER_MODE","content":"Welcome."}"#);
        assert_eq!(app.view.prompt_mode(), PromptMode::Plain);
    }

    #[test]
    fn test_history_recall_with_arrows() {
        let mut app = app();
        type_text(&mut app, "north");
        update(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "look");
        update(&mut app, key(KeyCode::Enter));

        update(&mut app, key(KeyCode::Up));
        assert_eq!(app.input.text(), "look");
        update(&mut app, key(KeyCode::Up));
        assert_eq!(app.input.text(), "north");
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Down));
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_payloads_render_into_log() {
        let mut app = app();
        server(&mut app, "\x1b[32mA rat scurries past.\x1b[0m");
        assert_eq!(last_log_text(&app).as_deref(), Some("A rat scurries past."));

        server(&mut app, r#"{"type":"STAT_UPDATE","hp":40,"maxHp":80}"#);
        assert_eq!(
            app.view.gauges().health.map(|g| g.text()).as_deref(),
            Some("40/80")
        );
    }

    #[test]
    fn test_connection_failure_blocks_sending() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Connection(ConnectionEvent::Failed {
                error: "reset by peer".to_string(),
            }),
        );
        assert_eq!(
            last_log_text(&app).as_deref(),
            Some("Connection lost: reset by peer")
        );

        type_text(&mut app, "look");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.input.text(), "look");
    }

    #[test]
    fn test_frame_updates_scroll_metrics() {
        let mut app = app();
        for i in 0..50 {
            server(&mut app, &format!("line {i}"));
        }
        update(&mut app, UiEvent::Frame { width: 40, height: 20 });
        // 50 server lines plus the connect notice.
        assert_eq!(app.scroll.cached_line_count, 51);
        assert_eq!(app.scroll.viewport_height, 16);

        update(&mut app, key(KeyCode::PageUp));
        assert!(!app.scroll.is_following());
        type_text(&mut app, "n");
        update(&mut app, key(KeyCode::Enter));
        assert!(app.scroll.is_following());
    }
}
