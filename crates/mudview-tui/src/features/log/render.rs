//! Log pane rendering.
//!
//! Converts core styled blocks to ratatui lines, wraps them to the pane
//! width and draws the visible window with a scrollbar.

use mudview_core::log::{LogEntry, MessageLog};
use mudview_core::style::{self as core_style, SpanStyle};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::common::Scrollbar;
use crate::common::text::wrap_spans;
use crate::state::AppState;

/// Horizontal padding on each side of the log text.
pub const LOG_MARGIN: u16 = 1;

/// Column reserved for the scrollbar.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// Width available for log text in a pane of `pane_width` columns.
pub fn text_width(pane_width: u16) -> usize {
    pane_width.saturating_sub(LOG_MARGIN * 2 + SCROLLBAR_WIDTH) as usize
}

pub fn to_ratatui_color(color: core_style::Color) -> Color {
    use core_style::Color as C;
    match color {
        C::Black => Color::Black,
        C::Red => Color::Red,
        C::Green => Color::Green,
        C::Yellow => Color::Yellow,
        C::Blue => Color::Blue,
        C::Magenta => Color::Magenta,
        C::Cyan => Color::Cyan,
        C::White => Color::Gray,
        C::BrightBlack => Color::DarkGray,
        C::BrightRed => Color::LightRed,
        C::BrightGreen => Color::LightGreen,
        C::BrightYellow => Color::LightYellow,
        C::BrightBlue => Color::LightBlue,
        C::BrightMagenta => Color::LightMagenta,
        C::BrightCyan => Color::LightCyan,
        C::BrightWhite => Color::White,
        C::Indexed(n) => Color::Indexed(n),
        C::Rgb(r, g, b) => Color::Rgb(r, g, b),
    }
}

/// Maps a span style, using `tint` as the foreground when the span has none.
pub fn to_ratatui_style(style: &SpanStyle, tint: Option<Color>) -> Style {
    use core_style::Modifiers as M;

    let mut out = Style::default();
    if let Some(fg) = style.fg.map(to_ratatui_color).or(tint) {
        out = out.fg(fg);
    }
    if let Some(bg) = style.bg {
        out = out.bg(to_ratatui_color(bg));
    }
    let flags = [
        (M::BOLD, Modifier::BOLD),
        (M::DIM, Modifier::DIM),
        (M::ITALIC, Modifier::ITALIC),
        (M::UNDERLINE, Modifier::UNDERLINED),
        (M::REVERSE, Modifier::REVERSED),
        (M::STRIKETHROUGH, Modifier::CROSSED_OUT),
    ];
    for (flag, modifier) in flags {
        if style.modifiers.contains(flag) {
            out = out.add_modifier(modifier);
        }
    }
    out
}

/// Wrapped display lines for one block.
pub fn entry_lines(entry: &LogEntry, width: usize) -> Vec<Line<'static>> {
    let tint = entry.color().and_then(|c| c.to_color()).map(to_ratatui_color);
    entry
        .lines()
        .iter()
        .flat_map(|line| {
            let spans: Vec<(String, Style)> = line
                .spans
                .iter()
                .map(|s| (s.text.clone(), to_ratatui_style(&s.style, tint)))
                .collect();
            wrap_spans(&spans, width)
        })
        .collect()
}

pub fn log_lines(log: &MessageLog, width: usize) -> Vec<Line<'static>> {
    log.iter().flat_map(|e| entry_lines(e, width)).collect()
}

pub fn line_count(log: &MessageLog, width: usize) -> usize {
    log_lines(log, width).len()
}

/// Draws the visible window of the log, bottom-aligned.
pub fn render_log(state: &AppState, frame: &mut Frame, area: Rect) {
    let text_area = Rect {
        x: area.x + LOG_MARGIN,
        width: text_width(area.width) as u16,
        ..area
    };
    let height = area.height as usize;

    let lines = log_lines(state.view.log(), text_area.width as usize);
    let total = lines.len();
    let offset = state.scroll.offset(total, height);

    let mut visible: Vec<Line<'static>> = lines.into_iter().skip(offset).take(height).collect();
    if visible.len() < height {
        let mut padded = vec![Line::default(); height - visible.len()];
        padded.append(&mut visible);
        visible = padded;
    }

    frame.render_widget(Paragraph::new(visible), text_area);
    frame.render_widget(Scrollbar::new(total, height, offset), area);
}

#[cfg(test)]
mod tests {
    use mudview_core::ClientView;
    use mudview_core::style::ColorSpec;

    use super::*;

    #[test]
    fn test_tint_applies_only_to_unstyled_spans() {
        let mut view = ClientView::default();
        view.append(Some("\x1b[34mblue\x1b[0m plain"), Some(&ColorSpec::new("#00FF00")));
        let entry = view.log().last().unwrap();
        let lines = entry_lines(entry, 80);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Blue));
        assert_eq!(lines[0].spans[1].style.fg, Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_modifiers_mapped() {
        let mut view = ClientView::default();
        view.append(Some("\x1b[1;4mloud"), None);
        let lines = entry_lines(view.log().last().unwrap(), 80);
        let style = lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_separator_block_is_one_blank_line() {
        let mut view = ClientView::default();
        view.append(Some("\n"), None);
        assert_eq!(line_count(view.log(), 40), 1);
    }

    #[test]
    fn test_long_lines_wrap() {
        let mut view = ClientView::default();
        view.append(Some(&"x".repeat(25)), None);
        assert_eq!(line_count(view.log(), 10), 3);
    }
}
