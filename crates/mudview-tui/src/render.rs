//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::input::{INPUT_HEIGHT, render_input};
use crate::log::{render_log, text_width};
use crate::state::AppState;
use crate::statusline::{STATUS_HEIGHT, render_status};

/// Log text width and visible rows for a terminal of the given size.
///
/// Must agree with the layout in [`render`].
pub fn log_viewport(width: u16, height: u16) -> (usize, usize) {
    let rows = height.saturating_sub(STATUS_HEIGHT + INPUT_HEIGHT);
    (text_width(width), rows as usize)
}

/// Renders the entire TUI: log on top, status row, input box at the bottom.
pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(frame.area());

    render_log(app, frame, chunks[0]);
    render_status(app, frame, chunks[1]);
    render_input(app, frame, chunks[2]);
}

#[cfg(test)]
mod tests {
    use mudview_core::ClientView;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn screen(app: &AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_layout_shows_log_gauges_and_input() {
        let mut view = ClientView::default();
        view.handle("You are standing in a village square.");
        view.handle(r#"{"hp":50,"maxHp":100,"mp":20,"maxMp":40}"#);
        let mut app = AppState::new(view, "ws://localhost/ws");
        app.input.set_text("look");

        let rows = screen(&app, 80, 10);
        assert!(rows[5].contains("You are standing in a village square."));
        assert!(rows[6].contains("HP 50/100"));
        assert!(rows[6].contains("MP 20/40"));
        assert!(rows[8].contains("look"));
    }

    #[test]
    fn test_log_is_bottom_aligned() {
        let mut view = ClientView::default();
        view.handle("only line");
        let app = AppState::new(view, "ws://localhost/ws");
        let rows = screen(&app, 40, 8);
        assert!(rows[3].contains("only line"));
        assert!(rows[0].trim().is_empty());
    }

    #[test]
    fn test_masked_input_hides_text() {
        let mut view = ClientView::default();
        view.handle(r#"{"type":"PWD_MODE","content":"Password:"}"#);
        let mut app = AppState::new(view, "ws://localhost/ws");
        app.input.set_text("hunter2");
        let rows = screen(&app, 40, 8);
        assert!(rows[6].contains("*******"));
        assert!(!rows.iter().any(|r| r.contains("hunter2")));
        assert!(rows[5].contains("Password"));
    }

    #[test]
    fn test_log_viewport_matches_layout() {
        assert_eq!(log_viewport(80, 24), (77, 20));
        assert_eq!(log_viewport(10, 2), (7, 0));
    }
}
