//! Session view state.
//!
//! [`ClientView`] owns everything the client displays for one session: the
//! bounded message log, the stat gauges and the current input echo mode.
//! It is created once at startup and handed to whoever feeds it messages.
//! The dispatcher and renderers are implemented on it in `dispatch` and
//! `render`.

use serde::{Deserialize, Serialize};

use crate::gauges::StatGauges;
use crate::log::MessageLog;
use crate::protocol::PromptMode;
use crate::style::ColorSpec;

/// Default color for a creature's health status line.
pub const DEFAULT_EMPHASIS_COLOR: &str = "#00FF00";

/// Fixed wording used by the composite renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Header above a creature's item list.
    pub carrying: String,
    /// Header above a corpse's item list.
    pub items_found: String,
    /// Appended to a corpse's description.
    pub corpse_suffix: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            carrying: "Carrying:".to_string(),
            items_found: "Items found:".to_string(),
            corpse_suffix: " now lies here, a cold and silent corpse.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub emphasis: ColorSpec,
    pub labels: Labels,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            emphasis: ColorSpec::new(DEFAULT_EMPHASIS_COLOR),
            labels: Labels::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ClientView {
    pub(crate) log: MessageLog,
    pub(crate) gauges: StatGauges,
    pub(crate) prompt_mode: PromptMode,
    pub(crate) settings: RenderSettings,
}

impl ClientView {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn gauges(&self) -> &StatGauges {
        &self.gauges
    }

    pub fn prompt_mode(&self) -> PromptMode {
        self.prompt_mode
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}
