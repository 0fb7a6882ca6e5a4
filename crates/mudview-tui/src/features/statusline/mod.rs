//! Status row: connection state and the stat gauges.

use mudview_core::gauges::GaugeReading;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use crate::common::text::truncate_with_ellipsis;
use crate::state::{AppState, ConnectionStatus};

/// Height of the status row.
pub const STATUS_HEIGHT: u16 = 1;

const GAUGE_WIDTH: u16 = 18;
const ENERGY_WIDTH: u16 = 9;

/// Fill ratio for drawing. The bar cannot exceed its track, so this is the
/// only place the percentage is clamped.
pub fn gauge_ratio(reading: Option<GaugeReading>) -> f64 {
    reading.map_or(0.0, |r| (r.fill_percent() / 100.0).clamp(0.0, 1.0))
}

fn gauge_label(prefix: &str, reading: Option<GaugeReading>) -> String {
    match reading {
        Some(r) => format!("{prefix} {}", r.text()),
        None => format!("{prefix} --"),
    }
}

fn connection_line(state: &AppState, width: usize) -> Line<'static> {
    let (dot, color, text) = match &state.connection {
        ConnectionStatus::Connecting => ("◌", Color::Yellow, format!("connecting {}", state.server_url)),
        ConnectionStatus::Connected => ("●", Color::Green, state.server_url.clone()),
        ConnectionStatus::Disconnected { reason } => ("○", Color::Red, format!("offline: {reason}")),
    };
    Line::from(vec![
        Span::styled(format!("{dot} "), Style::default().fg(color)),
        Span::styled(
            truncate_with_ellipsis(&text, width.saturating_sub(2)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

pub fn render_status(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(GAUGE_WIDTH),
            Constraint::Length(1),
            Constraint::Length(GAUGE_WIDTH),
            Constraint::Length(ENERGY_WIDTH),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(connection_line(state, chunks[0].width as usize)),
        chunks[0],
    );

    let gauges = state.view.gauges();
    let label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let health = Gauge::default()
        .gauge_style(Style::default().fg(Color::Red).bg(Color::Black))
        .ratio(gauge_ratio(gauges.health))
        .label(Span::styled(gauge_label("HP", gauges.health), label_style));
    frame.render_widget(health, chunks[1]);

    let mana = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .ratio(gauge_ratio(gauges.mana))
        .label(Span::styled(gauge_label("MP", gauges.mana), label_style));
    frame.render_widget(mana, chunks[3]);

    if let Some(energy) = gauges.energy_text() {
        let text = Paragraph::new(Line::from(Span::styled(
            format!(" EN {energy}"),
            Style::default().fg(Color::Yellow),
        )));
        frame.render_widget(text, chunks[4]);
    }
}
