//! Bounded message log.
//!
//! Holds the rendered blocks shown in the scrolling log, oldest first.
//! The log never holds more than [`MAX_LOG_ENTRIES`] blocks; appending past
//! the cap evicts from the front.

use std::collections::VecDeque;

use crate::style::{ColorSpec, StyledLine};

/// Maximum number of blocks kept in the log.
pub const MAX_LOG_ENTRIES: usize = 200;

/// One rendered block of output. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
    color: Option<ColorSpec>,
    lines: Vec<StyledLine>,
}

impl LogEntry {
    pub(crate) fn new(text: String, color: Option<ColorSpec>, lines: Vec<StyledLine>) -> Self {
        Self { text, color, lines }
    }

    /// Raw source text, escape sequences included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Block-level color override.
    pub fn color(&self) -> Option<&ColorSpec> {
        self.color.as_ref()
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    /// Text with escape sequences removed, lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(StyledLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default)]
pub struct MessageLog {
    entries: VecDeque<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block, evicting the oldest when over capacity.
    pub(crate) fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> LogEntry {
        LogEntry::new(text.to_string(), None, vec![StyledLine::empty()])
    }

    #[test]
    fn test_fifo_eviction_keeps_latest_in_order() {
        let mut log = MessageLog::new();
        for i in 0..250 {
            log.push(entry(&format!("line {i}")));
        }
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        let texts: Vec<&str> = log.iter().map(LogEntry::text).collect();
        assert_eq!(texts.first(), Some(&"line 50"));
        assert_eq!(texts.last(), Some(&"line 249"));
        for (offset, text) in texts.iter().enumerate() {
            assert_eq!(*text, format!("line {}", offset + 50));
        }
    }

    #[test]
    fn test_under_capacity_keeps_everything() {
        let mut log = MessageLog::new();
        log.push(entry("a"));
        log.push(entry("b"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(LogEntry::text), Some("b"));
    }
}
