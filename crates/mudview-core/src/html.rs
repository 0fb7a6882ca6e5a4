//! HTML export of the log and gauges.
//!
//! Produces a self-contained page mirroring the browser client's layout:
//! one `div.log-entry` per block and the `hp-val`/`hp-bar`/`mp-val`/`mp-bar`
//! gauge elements. Colors are emitted as inline CSS.

use std::fmt::Write;

use crate::gauges::{GaugeReading, StatGauges};
use crate::log::{LogEntry, MessageLog};
use crate::style::{Color, Modifiers, SpanStyle};
use crate::view::ClientView;

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn css_color(color: Color) -> String {
    let (r, g, b) = color.to_rgb();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn span_css(style: &SpanStyle) -> String {
    let mut css = Vec::new();
    let (fg, bg) = if style.modifiers.contains(Modifiers::REVERSE) {
        (style.bg.or(Some(Color::Black)), style.fg.or(Some(Color::White)))
    } else {
        (style.fg, style.bg)
    };
    if let Some(fg) = fg {
        css.push(format!("color:{}", css_color(fg)));
    }
    if let Some(bg) = bg {
        css.push(format!("background-color:{}", css_color(bg)));
    }
    if style.modifiers.contains(Modifiers::BOLD) {
        css.push("font-weight:bold".to_string());
    }
    if style.modifiers.contains(Modifiers::DIM) {
        css.push("opacity:0.7".to_string());
    }
    if style.modifiers.contains(Modifiers::ITALIC) {
        css.push("font-style:italic".to_string());
    }
    let mut decorations = Vec::new();
    if style.modifiers.contains(Modifiers::UNDERLINE) {
        decorations.push("underline");
    }
    if style.modifiers.contains(Modifiers::STRIKETHROUGH) {
        decorations.push("line-through");
    }
    if !decorations.is_empty() {
        css.push(format!("text-decoration:{}", decorations.join(" ")));
    }
    css.join(";")
}

/// Renders one log block.
pub fn entry_to_html(entry: &LogEntry) -> String {
    let mut out = String::from("<div class=\"log-entry\"");
    // Only resolvable colors are emitted; the raw string never reaches the markup.
    if let Some(color) = entry.color().and_then(|c| c.to_color()) {
        let _ = write!(out, " style=\"color:{}\"", css_color(color));
    }
    out.push('>');

    for (i, line) in entry.lines().iter().enumerate() {
        if i > 0 {
            out.push_str("<br>");
        }
        for span in &line.spans {
            let text = escape(&span.text);
            if span.style.is_plain() {
                out.push_str(&text);
            } else {
                let _ = write!(out, "<span style=\"{}\">{text}</span>", span_css(&span.style));
            }
        }
    }

    out.push_str("</div>");
    out
}

pub fn log_to_html(log: &MessageLog) -> String {
    log.iter().map(entry_to_html).collect::<Vec<_>>().join("\n")
}

fn gauge_html(out: &mut String, prefix: &str, reading: Option<GaugeReading>) {
    let (text, width) = match reading {
        Some(r) => (r.text(), format!("{:.1}%", r.fill_percent())),
        None => (String::new(), "0%".to_string()),
    };
    let _ = writeln!(out, "<span id=\"{prefix}-val\">{}</span>", escape(&text));
    let _ = writeln!(
        out,
        "<div class=\"bar\"><div id=\"{prefix}-bar\" style=\"width:{width}\"></div></div>"
    );
}

pub fn gauges_to_html(gauges: &StatGauges) -> String {
    let mut out = String::new();
    gauge_html(&mut out, "hp", gauges.health);
    gauge_html(&mut out, "mp", gauges.mana);
    if let Some(energy) = gauges.energy_text() {
        let _ = writeln!(out, "<span id=\"energy-val\">{}</span>", escape(&energy));
    }
    out
}

const PAGE_STYLE: &str = "body{background:#000;color:#c0c0c0;font-family:monospace}\
.log-entry{white-space:pre-wrap}\
.bar{background:#333;width:200px;height:8px}\
#hp-bar{background:#c00;height:100%}\
#mp-bar{background:#00c;height:100%}";

/// Renders the whole view as a standalone HTML page.
pub fn document(view: &ClientView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>mudview</title>");
    let _ = writeln!(out, "<style>{PAGE_STYLE}</style></head><body>");
    let _ = writeln!(out, "<div id=\"stats\">");
    out.push_str(&gauges_to_html(view.gauges()));
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "<div id=\"log\">");
    out.push_str(&log_to_html(view.log()));
    let _ = writeln!(out, "\n</div>");
    let _ = writeln!(out, "</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::style::ColorSpec;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_entry_markup_is_escaped() {
        let mut view = ClientView::default();
        view.append(Some("<script>alert(1)</script>"), None);
        let html = log_to_html(view.log());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_entry_colors() {
        let mut view = ClientView::default();
        view.append(Some("\x1b[1;31mhit\x1b[0m ok"), Some(&ColorSpec::new("#00FF00")));
        let html = log_to_html(view.log());
        assert_eq!(
            html,
            "<div class=\"log-entry\" style=\"color:#00ff00\">\
             <span style=\"color:#bb0000;font-weight:bold\">hit</span> ok</div>"
        );
    }

    #[test]
    fn test_unresolvable_color_is_dropped() {
        let mut view = ClientView::default();
        view.append(Some("x"), Some(&ColorSpec::new("red\" onclick=\"evil")));
        let html = log_to_html(view.log());
        assert_eq!(html, "<div class=\"log-entry\">x</div>");
    }

    #[test]
    fn test_multiline_entry() {
        let mut view = ClientView::default();
        view.append(Some("a\nb"), None);
        assert_eq!(log_to_html(view.log()), "<div class=\"log-entry\">a<br>b</div>");
    }

    #[test]
    fn test_gauges() {
        let mut view = ClientView::default();
        view.handle(json!({"hp": 50, "maxHp": 100, "energy": 80}));
        let html = gauges_to_html(view.gauges());
        assert!(html.contains("<span id=\"hp-val\">50/100</span>"));
        assert!(html.contains("id=\"hp-bar\" style=\"width:50.0%\""));
        assert!(html.contains("<span id=\"mp-val\"></span>"));
        assert!(html.contains("<span id=\"energy-val\">80%</span>"));
    }

    #[test]
    fn test_document_contains_log() {
        let mut view = ClientView::default();
        view.handle("Welcome");
        let page = document(&view);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<div class=\"log-entry\">Welcome</div>"));
    }
}
