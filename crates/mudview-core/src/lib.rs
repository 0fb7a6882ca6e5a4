//! Core mudview library (protocol, rendering, log, gauges, config).

pub mod ansi;
pub mod config;
pub mod dispatch;
pub mod gauges;
pub mod html;
pub mod input;
pub mod log;
pub mod logging;
pub mod protocol;
pub mod render;
pub mod style;
pub mod view;

pub use dispatch::Dispatch;
pub use input::{CommandHistory, CommandSink, submit_command};
pub use protocol::{Framing, InboundMessage, MessageKind, PromptMode, RawPayload};
pub use view::{ClientView, Labels, RenderSettings};
