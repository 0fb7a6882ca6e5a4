//! Input line rendering.

use mudview_core::PromptMode;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::text::mask;
use crate::state::AppState;

/// Rows taken by the bordered input box.
pub const INPUT_HEIGHT: u16 = 3;

/// Text as displayed: masked while the server asks for a password.
pub fn display_text(text: &str, mode: PromptMode) -> String {
    match mode {
        PromptMode::Plain => text.to_string(),
        PromptMode::Masked => mask(text),
    }
}

/// Columns to skip so the cursor column stays inside `width`.
fn horizontal_scroll(cursor_col: usize, width: usize) -> usize {
    if width == 0 {
        return cursor_col;
    }
    (cursor_col + 1).saturating_sub(width)
}

pub fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let mode = state.view.prompt_mode();
    let (title, border) = match mode {
        PromptMode::Plain => (" Command ", Color::DarkGray),
        PromptMode::Masked => (" Password ", Color::Yellow),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let inner = block.inner(area);

    let shown = display_text(state.input.text(), mode);
    let before_cursor: String = shown.chars().take(state.input.cursor()).collect();
    let cursor_col = before_cursor.width();
    let skip = horizontal_scroll(cursor_col, inner.width as usize);

    let paragraph = Paragraph::new(shown)
        .block(block)
        .scroll((0, u16::try_from(skip).unwrap_or(u16::MAX)));
    frame.render_widget(paragraph, area);

    if inner.width > 0 && inner.height > 0 {
        let x = inner.x + (cursor_col - skip) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_display() {
        assert_eq!(display_text("hunter2", PromptMode::Masked), "*******");
        assert_eq!(display_text("hunter2", PromptMode::Plain), "hunter2");
    }

    #[test]
    fn test_horizontal_scroll_keeps_cursor_visible() {
        assert_eq!(horizontal_scroll(5, 10), 0);
        assert_eq!(horizontal_scroll(9, 10), 0);
        assert_eq!(horizontal_scroll(10, 10), 1);
        assert_eq!(horizontal_scroll(25, 10), 16);
    }
}
