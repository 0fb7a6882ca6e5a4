//! Command submission and history.

use std::collections::VecDeque;

use anyhow::Result;

/// Maximum number of commands kept for recall.
pub const MAX_HISTORY: usize = 100;

/// Where submitted commands go (usually the server connection).
pub trait CommandSink {
    /// Sends one command.
    ///
    /// # Errors
    /// Returns an error if the command could not be handed to the transport.
    fn send(&mut self, command: &str) -> Result<()>;
}

impl CommandSink for Vec<String> {
    fn send(&mut self, command: &str) -> Result<()> {
        self.push(command.to_string());
        Ok(())
    }
}

/// Submits the input buffer.
///
/// The buffer is trimmed; a non-empty command is sent and the buffer
/// cleared. Blank input leaves the buffer untouched and returns `None`.
///
/// # Errors
/// Propagates sink failures. The buffer is kept so the command can be retried.
pub fn submit_command<S: CommandSink + ?Sized>(
    buffer: &mut String,
    sink: &mut S,
) -> Result<Option<String>> {
    let command = buffer.trim();
    if command.is_empty() {
        return Ok(None);
    }
    let command = command.to_string();
    sink.send(&command)?;
    buffer.clear();
    Ok(Some(command))
}

/// Bounded history of submitted commands with Up/Down navigation.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    /// Index into `entries` while browsing; `None` when editing a fresh line.
    cursor: Option<usize>,
    /// The line being edited before browsing started.
    draft: String,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a command. Repeats of the latest entry are collapsed.
    pub fn record(&mut self, command: &str) {
        self.cursor = None;
        if self.entries.back().is_some_and(|last| last == command) {
            return;
        }
        self.entries.push_back(command.to_string());
        while self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Steps to an older command. `current` is saved as the draft when
    /// browsing starts.
    pub fn older(&mut self, current: &str) -> Option<&str> {
        let next_cursor = match self.cursor {
            None => {
                if self.entries.is_empty() {
                    return None;
                }
                self.draft = current.to_string();
                self.entries.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(next_cursor);
        self.entries.get(next_cursor).map(String::as_str)
    }

    /// Steps to a newer command, returning to the draft past the newest.
    pub fn newer(&mut self) -> Option<String> {
        let cursor = self.cursor?;
        if cursor + 1 < self.entries.len() {
            self.cursor = Some(cursor + 1);
            self.entries.get(cursor + 1).cloned()
        } else {
            self.cursor = None;
            Some(std::mem::take(&mut self.draft))
        }
    }

    /// Leaves browsing mode without changing the entries.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl CommandSink for FailingSink {
        fn send(&mut self, _command: &str) -> Result<()> {
            anyhow::bail!("connection closed")
        }
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut sink: Vec<String> = Vec::new();
        let mut buffer = "  look north  ".to_string();
        let sent = submit_command(&mut buffer, &mut sink).unwrap();
        assert_eq!(sent.as_deref(), Some("look north"));
        assert_eq!(sink, vec!["look north".to_string()]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_submit_blank_is_noop() {
        let mut sink: Vec<String> = Vec::new();
        let mut buffer = "   ".to_string();
        assert_eq!(submit_command(&mut buffer, &mut sink).unwrap(), None);
        assert!(sink.is_empty());
        assert_eq!(buffer, "   ");
    }

    #[test]
    fn test_submit_failure_keeps_buffer() {
        let mut buffer = "say hi".to_string();
        assert!(submit_command(&mut buffer, &mut FailingSink).is_err());
        assert_eq!(buffer, "say hi");
    }

    #[test]
    fn test_history_navigation() {
        let mut history = CommandHistory::new();
        history.record("n");
        history.record("kill rat");

        assert_eq!(history.older("dra"), Some("kill rat"));
        assert_eq!(history.older("ignored"), Some("n"));
        assert_eq!(history.older("ignored"), Some("n"));
        assert_eq!(history.newer().as_deref(), Some("kill rat"));
        assert_eq!(history.newer().as_deref(), Some("dra"));
        assert!(!history.is_browsing());
        assert_eq!(history.newer(), None);
    }

    #[test]
    fn test_history_is_bounded_and_collapses_repeats() {
        let mut history = CommandHistory::new();
        for i in 0..(MAX_HISTORY + 10) {
            history.record(&format!("cmd {i}"));
        }
        history.record(&format!("cmd {}", MAX_HISTORY + 9));
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.older(""), Some("cmd 109"));
    }
}
