//! UI event types.
//!
//! All external inputs (terminal, server connection, timers) are converted
//! to `UiEvent` before being processed by the reducer. The connection task
//! sends its events straight to the runtime's inbox; the runtime drains the
//! inbox each frame and applies events in arrival order.

use crossterm::event::Event as CrosstermEvent;

/// Events produced by the server connection task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The WebSocket handshake completed.
    Connected,
    /// One inbound frame, as text.
    Payload(String),
    /// The server closed the connection.
    Closed { reason: Option<String> },
    /// Connecting, reading or writing failed. The connection is gone.
    Failed { error: String },
}

#[derive(Debug)]
pub enum UiEvent {
    /// Frame cadence tick; the only event that triggers a redraw.
    Tick,
    /// Current terminal size, emitted at the start of every loop iteration.
    Frame { width: u16, height: u16 },
    Terminal(CrosstermEvent),
    Connection(ConnectionEvent),
}
