//! Vertical scrollbar for the log pane.
//!
//! The thumb length is computed once from the content/viewport ratio so it
//! does not change size while scrolling, and the thumb touches the bottom
//! of the track exactly when the view is at the newest line.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

#[derive(Debug, Clone, Copy)]
pub struct Scrollbar {
    total_lines: usize,
    viewport_height: usize,
    /// First visible line (0 = top).
    offset: usize,
}

impl Scrollbar {
    pub fn new(total_lines: usize, viewport_height: usize, offset: usize) -> Self {
        Self {
            total_lines,
            viewport_height,
            offset,
        }
    }

    fn is_needed(&self) -> bool {
        self.total_lines > self.viewport_height
    }

    /// Returns `(thumb_start, thumb_len)` within a track of `track_len` cells.
    fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_offset = self.total_lines.saturating_sub(self.viewport_height);
        if track_len == 0 || max_offset == 0 {
            return None;
        }
        let thumb_len = (track_len * self.viewport_height)
            .div_ceil(self.total_lines)
            .clamp(1, track_len);
        let free = track_len - thumb_len;
        let start = self.offset.min(max_offset) * free / max_offset;
        Some((start, thumb_len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_needed() {
            return;
        }
        let Some((start, len)) = self.thumb(area.height as usize) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        let style = Style::default().fg(Color::DarkGray);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let symbol = if (start..start + len).contains(&idx) {
                THUMB_SYMBOL
            } else {
                TRACK_SYMBOL
            };
            buf.set_string(x, y, symbol, style);
        }
    }
}
