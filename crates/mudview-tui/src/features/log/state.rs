//! Scroll state for the log pane.

/// Scroll mode for the log pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Auto-scroll to show the newest block.
    FollowLatest,
    /// User scrolled manually; offset is the line index from the top.
    Anchored { offset: usize },
}

/// Scroll position plus the metrics from the last frame.
///
/// Metrics are refreshed on every `Frame` event so key and mouse handlers
/// can scroll by pages without access to the renderer.
#[derive(Debug, Clone)]
pub struct ScrollState {
    pub mode: ScrollMode,
    /// Total wrapped line count at the last frame.
    pub cached_line_count: usize,
    /// Visible log rows at the last frame.
    pub viewport_height: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            mode: ScrollMode::FollowLatest,
            cached_line_count: 0,
            viewport_height: 0,
        }
    }
}

impl ScrollState {
    pub fn is_following(&self) -> bool {
        matches!(self.mode, ScrollMode::FollowLatest)
    }

    /// First visible line for content of `total_lines` in `viewport_height` rows.
    pub fn offset(&self, total_lines: usize, viewport_height: usize) -> usize {
        let max_offset = total_lines.saturating_sub(viewport_height);
        match self.mode {
            ScrollMode::FollowLatest => max_offset,
            ScrollMode::Anchored { offset } => offset.min(max_offset),
        }
    }

    fn current_offset(&self) -> usize {
        self.offset(self.cached_line_count, self.viewport_height)
    }

    pub fn update_metrics(&mut self, line_count: usize, viewport_height: usize) {
        self.cached_line_count = line_count;
        self.viewport_height = viewport_height;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let offset = self.current_offset().saturating_sub(lines);
        self.mode = ScrollMode::Anchored { offset };
    }

    /// Scrolls down, resuming follow mode at the bottom.
    pub fn scroll_down(&mut self, lines: usize) {
        if self.is_following() {
            return;
        }
        let max_offset = self.cached_line_count.saturating_sub(self.viewport_height);
        let offset = (self.current_offset() + lines).min(max_offset);
        self.mode = if offset >= max_offset {
            ScrollMode::FollowLatest
        } else {
            ScrollMode::Anchored { offset }
        };
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.mode = ScrollMode::Anchored { offset: 0 };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.mode = ScrollMode::FollowLatest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrolled(lines: usize, viewport: usize) -> ScrollState {
        let mut state = ScrollState::default();
        state.update_metrics(lines, viewport);
        state
    }

    #[test]
    fn test_follow_shows_bottom() {
        let state = scrolled(100, 20);
        assert_eq!(state.offset(100, 20), 80);
        assert_eq!(state.offset(10, 20), 0);
    }

    #[test]
    fn test_scroll_up_then_down_resumes_follow() {
        let mut state = scrolled(100, 20);
        state.scroll_up(5);
        assert_eq!(state.mode, ScrollMode::Anchored { offset: 75 });
        state.scroll_down(3);
        assert_eq!(state.mode, ScrollMode::Anchored { offset: 78 });
        state.scroll_down(10);
        assert!(state.is_following());
    }

    #[test]
    fn test_anchored_offset_is_clamped() {
        let mut state = scrolled(100, 20);
        state.scroll_to_top();
        state.page_down();
        assert_eq!(state.mode, ScrollMode::Anchored { offset: 20 });
        // Log shrank after eviction or resize.
        assert_eq!(state.offset(30, 20), 10);
    }

    #[test]
    fn test_page_up_from_follow() {
        let mut state = scrolled(100, 20);
        state.page_up();
        assert_eq!(state.mode, ScrollMode::Anchored { offset: 60 });
    }
}
