//! Shared widgets and helpers.

pub mod scrollbar;
pub mod text;

pub use scrollbar::Scrollbar;
