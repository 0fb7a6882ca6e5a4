//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never touches the network itself: a submitted command
//! becomes `UiEffect::SendCommand` and the runtime hands it to the
//! connection.

use anyhow::Result;
use mudview_core::CommandSink;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Send a command to the server.
    SendCommand(String),
}

/// Collects submitted commands as effects.
///
/// Lets the reducer use the same submission path as any other
/// [`CommandSink`] while deferring the actual I/O to the runtime.
pub struct EffectSink<'a>(pub &'a mut Vec<UiEffect>);

impl CommandSink for EffectSink<'_> {
    fn send(&mut self, command: &str) -> Result<()> {
        self.0.push(UiEffect::SendCommand(command.to_string()));
        Ok(())
    }
}
