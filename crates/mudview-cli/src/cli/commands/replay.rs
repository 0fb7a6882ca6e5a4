//! Replay command: renders a captured session without a server.
//!
//! The input file holds one server payload per line, exactly as received
//! in a WebSocket text frame. Blank lines are skipped.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use mudview_core::ClientView;
use mudview_core::config::Config;
use mudview_core::gauges::GaugeReading;
use mudview_core::html;
use mudview_core::log::LogEntry;
use mudview_core::style::{Color, Modifiers, SpanStyle};
use tracing::debug;

/// Output format for `mudview replay`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReplayFormat {
    /// Plain text, escape sequences stripped
    #[default]
    Text,
    /// Text with 24-bit ANSI colors
    Ansi,
    /// Standalone HTML page
    Html,
}

pub fn run(path: &Path, format: ReplayFormat, config: &Config) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;

    let view = replay(&contents, config);
    let report = match format {
        ReplayFormat::Text => text_report(&view),
        ReplayFormat::Ansi => ansi_report(&view),
        ReplayFormat::Html => html::document(&view),
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .context("Failed to write replay output")?;
    stdout.flush().context("Failed to write replay output")
}

/// Feeds every non-blank line of `session` through a fresh view.
fn replay(session: &str, config: &Config) -> ClientView {
    let mut view = ClientView::new(config.render_settings());
    for (number, line) in session.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let dispatch = view.handle(line);
        debug!(line = number + 1, kind = ?dispatch.kind, appended = dispatch.appended, "Replayed payload");
    }
    view
}

fn gauge_lines(view: &ClientView, out: &mut String) {
    let gauges = view.gauges();
    let readings = [("HP", gauges.health), ("MP", gauges.mana)];
    for (label, reading) in readings {
        if let Some(reading) = reading {
            let _ = writeln!(out, "{}", gauge_line(label, reading));
        }
    }
    if let Some(energy) = gauges.energy_text() {
        let _ = writeln!(out, "EN {energy}");
    }
}

fn gauge_line(label: &str, reading: GaugeReading) -> String {
    format!("{label} {} ({:.0}%)", reading.text(), reading.fill_percent())
}

fn text_report(view: &ClientView) -> String {
    let mut out = String::new();
    for entry in view.log().iter() {
        let _ = writeln!(out, "{}", entry.plain_text());
    }
    gauge_lines(view, &mut out);
    out
}

fn ansi_report(view: &ClientView) -> String {
    let mut out = String::new();
    for entry in view.log().iter() {
        write_ansi_entry(entry, &mut out);
    }
    gauge_lines(view, &mut out);
    out
}

fn write_ansi_entry(entry: &LogEntry, out: &mut String) {
    let tint = entry.color().and_then(|c| c.to_color());
    for line in entry.lines() {
        for span in &line.spans {
            let sgr = sgr(&span.style, tint);
            if sgr.is_empty() {
                out.push_str(&span.text);
            } else {
                let _ = write!(out, "{sgr}{}\x1b[0m", span.text);
            }
        }
        out.push('\n');
    }
}

/// SGR prefix for a span. A span's own foreground wins over the block tint.
fn sgr(style: &SpanStyle, tint: Option<Color>) -> String {
    let mut codes: Vec<String> = Vec::new();
    let flags = [
        (Modifiers::BOLD, "1"),
        (Modifiers::DIM, "2"),
        (Modifiers::ITALIC, "3"),
        (Modifiers::UNDERLINE, "4"),
        (Modifiers::REVERSE, "7"),
        (Modifiers::STRIKETHROUGH, "9"),
    ];
    for (flag, code) in flags {
        if style.modifiers.contains(flag) {
            codes.push(code.to_string());
        }
    }
    if let Some((r, g, b)) = style.fg.or(tint).map(Color::to_rgb) {
        codes.push(format!("38;2;{r};{g};{b}"));
    }
    if let Some((r, g, b)) = style.bg.map(Color::to_rgb) {
        codes.push(format!("48;2;{r};{g};{b}"));
    }

    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use mudview_core::style::ColorSpec;

    use super::*;

    const SESSION: &str = concat!(
        "Welcome to the village.\n",
        "\n",
        r#"{"hp":50,"maxHp":100,"mp":20,"maxMp":40,"energy":80}"#,
        "\n",
        "\x1b[31mA goblin snarls.\x1b[0m\r\n",
    );

    #[test]
    fn test_replay_skips_blank_lines() {
        let view = replay(SESSION, &Config::default());
        assert_eq!(view.log().len(), 2);
    }

    #[test]
    fn test_text_report_strips_escapes_and_lists_gauges() {
        let view = replay(SESSION, &Config::default());
        let report = text_report(&view);
        assert_eq!(
            report,
            "Welcome to the village.\nA goblin snarls.\nHP 50/100 (50%)\nMP 20/40 (50%)\nEN 80%\n"
        );
    }

    #[test]
    fn test_ansi_report_keeps_span_colors() {
        let view = replay(SESSION, &Config::default());
        let report = ansi_report(&view);
        assert!(report.contains("\x1b[38;2;187;0;0mA goblin snarls.\x1b[0m"));
        assert!(report.starts_with("Welcome to the village.\n"));
    }

    #[test]
    fn test_block_tint_applies_to_unstyled_spans() {
        let view = replay(
            r#"{"type":"MOB_DETAIL","payload":{"description":"A goblin.","healthStatus":"It is wounded."}}"#,
            &Config::default(),
        );
        let report = ansi_report(&view);
        assert!(report.contains("\x1b[38;2;0;255;0mIt is wounded.\x1b[0m"));
    }

    #[test]
    fn test_unresolvable_emphasis_leaves_status_uncolored() {
        let config = Config {
            emphasis_color: ColorSpec::new("#€"),
            ..Config::default()
        };
        let view = replay(
            r#"{"type":"MOB_DETAIL","payload":{"healthStatus":"It is wounded."}}"#,
            &config,
        );
        let report = ansi_report(&view);
        assert!(report.starts_with("It is wounded.\n"));
    }

    #[test]
    fn test_sgr_empty_for_plain_span() {
        assert_eq!(sgr(&SpanStyle::default(), None), "");
        let bold = SpanStyle {
            modifiers: Modifiers::BOLD,
            ..SpanStyle::default()
        };
        assert_eq!(sgr(&bold, None), "\x1b[1m");
    }
}
