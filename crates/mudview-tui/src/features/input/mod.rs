//! Command input line.

mod render;
mod state;
mod update;

pub use render::{INPUT_HEIGHT, display_text, render_input};
pub use state::InputState;
pub use update::{handle_key, handle_paste};
