//! Feature slices of the UI: each owns its state, key handling and rendering.

pub mod input;
pub mod log;
pub mod statusline;
