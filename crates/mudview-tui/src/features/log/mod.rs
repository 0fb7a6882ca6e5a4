//! Scrolling message log.

mod render;
mod state;
mod update;

pub use render::{entry_lines, line_count, log_lines, render_log, text_width};
pub use state::{ScrollMode, ScrollState};
pub use update::{handle_mouse, handle_scroll_key};
