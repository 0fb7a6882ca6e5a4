//! Text utilities for TUI rendering.
//!
//! Width math is unicode-aware: CJK and emoji count as two columns, which
//! matters for MUD output in non-Latin scripts.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Character shown in place of each masked input character.
pub const MASK_CHAR: char = '*';

/// Truncates a string with ellipsis if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Replaces every character with [`MASK_CHAR`].
pub fn mask(text: &str) -> String {
    text.chars().map(|_| MASK_CHAR).collect()
}

/// Hard-wraps styled spans to `width` columns, keeping each span's style.
///
/// Always returns at least one line. Tabs become four spaces and other
/// control characters are dropped so column math stays exact.
pub fn wrap_spans(spans: &[(String, Style)], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut segment = String::new();
    let mut used = 0;

    for (text, style) in spans {
        for ch in text.chars().flat_map(expand_char) {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !segment.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut segment), *style));
                }
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            segment.push(ch);
            used += w;
        }
        if !segment.is_empty() {
            current.push(Span::styled(std::mem::take(&mut segment), *style));
        }
    }

    lines.push(Line::from(current));
    lines
}

fn expand_char(ch: char) -> impl Iterator<Item = char> {
    let (c, n) = match ch {
        '\t' => (' ', 4),
        c if c.is_control() => (' ', 0),
        c => (c, 1),
    };
    std::iter::repeat_n(c, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("pw 密碼"), "*****");
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        let lines = wrap_spans(&[("abc".to_string(), Style::default())], 10);
        assert_eq!(texts(&lines), vec!["abc"]);
    }

    #[test]
    fn test_wrap_keeps_styles_across_break() {
        let red = Style::default().fg(ratatui::style::Color::Red);
        let lines = wrap_spans(
            &[("abcd".to_string(), Style::default()), ("efgh".to_string(), red)],
            5,
        );
        assert_eq!(texts(&lines), vec!["abcde", "fgh"]);
        assert_eq!(lines[1].spans[0].style, red);
    }

    #[test]
    fn test_wrap_wide_chars() {
        let lines = wrap_spans(&[("村莊入口".to_string(), Style::default())], 5);
        assert_eq!(texts(&lines), vec!["村莊", "入口"]);
    }

    #[test]
    fn test_wrap_empty_is_one_blank_line() {
        let lines = wrap_spans(&[], 10);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.is_empty());
    }
}
