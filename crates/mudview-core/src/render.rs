//! Renderers that turn messages into log blocks and gauge updates.

use tracing::warn;

use crate::ansi::to_styled_lines;
use crate::log::LogEntry;
use crate::protocol::{CorpseDetail, MobDetail, StatSnapshot};
use crate::style::ColorSpec;
use crate::view::ClientView;

/// Bullet placed before each listed item.
const ITEM_BULLET: &str = "  ˇ";

fn item_block(header: &str, items: &[String]) -> String {
    let mut block = header.to_string();
    for item in items {
        block.push('\n');
        block.push_str(ITEM_BULLET);
        block.push_str(item);
    }
    block
}

impl ClientView {
    /// Appends one block of possibly ANSI-colored text to the log.
    ///
    /// `color` tints the whole block; spans with their own foreground keep
    /// it. Returns `true` when a block was added. Empty text is a no-op and
    /// text with a malformed escape sequence is skipped with a warning.
    pub fn append(&mut self, text: Option<&str>, color: Option<&ColorSpec>) -> bool {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return false;
        };

        match to_styled_lines(text) {
            Ok(lines) => {
                self.log
                    .push(LogEntry::new(text.to_string(), color.cloned(), lines));
                true
            }
            Err(err) => {
                warn!(error = %err, "Skipping block with malformed escape sequence");
                false
            }
        }
    }

    /// Renders a creature: description, health status, carried items and a
    /// blank separator. Returns the number of blocks appended.
    pub fn render_mob_detail(&mut self, detail: &MobDetail) -> usize {
        let emphasis = self.settings.emphasis.clone();
        let mut appended = 0;

        appended += usize::from(self.append(detail.description.as_deref(), None));
        appended += usize::from(self.append(detail.health_status.as_deref(), Some(&emphasis)));
        if !detail.items.is_empty() {
            let block = item_block(&self.settings.labels.carrying, &detail.items);
            appended += usize::from(self.append(Some(&block), None));
        }
        appended += usize::from(self.append(Some("\n"), None));
        appended
    }

    /// Renders a corpse: description with the corpse sentence, items found
    /// and a blank separator. Returns the number of blocks appended.
    pub fn render_corpse_detail(&mut self, detail: &CorpseDetail) -> usize {
        let labels = &self.settings.labels;
        let sentence = format!(
            "{}{}",
            detail.description.as_deref().unwrap_or_default(),
            labels.corpse_suffix
        );
        let items = (!detail.items.is_empty())
            .then(|| item_block(&labels.items_found, &detail.items));

        let mut appended = usize::from(self.append(Some(&sentence), None));
        appended += usize::from(self.append(items.as_deref(), None));
        appended += usize::from(self.append(Some("\n"), None));
        appended
    }

    /// Applies a stat snapshot to the gauges. Absent stats are left as-is.
    pub fn update_stats(&mut self, snapshot: &StatSnapshot) {
        self.gauges.apply(snapshot);
    }
}
