//! Application state.
//!
//! ```text
//! AppState
//! ├── view: ClientView       (log, gauges, prompt mode; owned for the session)
//! ├── input: InputState      (edit buffer, cursor, command history)
//! ├── scroll: ScrollState    (log pane position)
//! └── connection: ConnectionStatus
//! ```

use mudview_core::ClientView;
use mudview_core::style::ColorSpec;

use crate::input::InputState;
use crate::log::ScrollState;

/// Color of client-generated lines (connection notices).
pub const SYSTEM_LINE_COLOR: &str = "yellow";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected { reason: String },
}

#[derive(Debug)]
pub struct AppState {
    pub view: ClientView,
    pub input: InputState,
    pub scroll: ScrollState,
    pub connection: ConnectionStatus,
    /// Shown in the status row.
    pub server_url: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(view: ClientView, server_url: impl Into<String>) -> Self {
        Self {
            view,
            input: InputState::new(),
            scroll: ScrollState::default(),
            connection: ConnectionStatus::Connecting,
            server_url: server_url.into(),
            should_quit: false,
        }
    }

    /// Appends a client notice to the log.
    pub fn push_system_line(&mut self, text: &str) {
        self.view
            .append(Some(text), Some(&ColorSpec::new(SYSTEM_LINE_COLOR)));
    }
}
