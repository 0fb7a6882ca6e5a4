//! Routing of inbound payloads to the renderers.

use tracing::debug;

use crate::protocol::{InboundMessage, MessageKind, RawPayload};
use crate::view::ClientView;

/// Outcome of handling one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: MessageKind,
    /// Number of log blocks the message produced.
    pub appended: usize,
}

impl ClientView {
    /// Classifies a payload and applies it to the view.
    ///
    /// Each recognized message triggers exactly one render or gauge update.
    /// Unrecognized shapes are dropped.
    pub fn handle(&mut self, raw: impl Into<RawPayload>) -> Dispatch {
        let raw = raw.into();
        let message = InboundMessage::from_raw(&raw);
        let kind = message.kind();
        let mut appended = 0;

        match message {
            InboundMessage::Text { content, mode } => {
                if let Some(mode) = mode {
                    self.prompt_mode = mode;
                }
                appended += usize::from(self.append(content.as_deref(), None));
            }
            InboundMessage::StatUpdate(snapshot) => self.update_stats(&snapshot),
            InboundMessage::MobDetail(detail) => appended += self.render_mob_detail(&detail),
            InboundMessage::CorpseDetail(detail) => {
                appended += self.render_corpse_detail(&detail);
            }
            InboundMessage::Unrecognized => {
                debug!(payload = ?raw, "Dropping unrecognized message");
            }
        }

        debug!(?kind, appended, log_len = self.log.len(), "Handled message");
        Dispatch { kind, appended }
    }
}
