//! Wire messages exchanged with the MUD server.
//!
//! Inbound payloads arrive either as raw strings (legacy plain-text output
//! or JSON documents) or as already-parsed JSON objects. Classification is
//! by explicit precedence over the object's fields and always succeeds:
//! anything that matches no known shape becomes
//! [`InboundMessage::Unrecognized`].
//!
//! Outbound commands are framed by [`Framing`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A payload as handed over by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Text(String),
    Object(Value),
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        RawPayload::Text(text)
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        RawPayload::Text(text.to_string())
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        RawPayload::Object(value)
    }
}

/// Input echo mode requested by the server (login prompts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    #[default]
    Plain,
    /// Password entry: the input line is masked and not kept in history.
    Masked,
}

/// Gauge values carried by a stat update. All fields optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatSnapshot {
    pub hp: Option<i64>,
    pub max_hp: Option<i64>,
    pub mp: Option<i64>,
    pub max_mp: Option<i64>,
    /// Combat resource, 0–100.
    pub energy: Option<i64>,
}

impl StatSnapshot {
    /// Reads a snapshot from a flat object or one wrapped in `payload`.
    pub fn from_value(value: &Value) -> Self {
        let source = match value.get("payload") {
            Some(inner @ Value::Object(_)) => inner,
            _ => value,
        };
        Self {
            hp: field_int(source, "hp"),
            max_hp: field_int(source, "maxHp"),
            mp: field_int(source, "mp"),
            max_mp: field_int(source, "maxMp"),
            energy: field_int(source, "energy"),
        }
    }
}

/// A closer look at a creature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MobDetail {
    pub description: Option<String>,
    pub health_status: Option<String>,
    pub items: Vec<String>,
}

/// A closer look at a corpse and what it carried.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorpseDetail {
    pub description: Option<String>,
    pub items: Vec<String>,
}

/// Discriminant of [`InboundMessage`], for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    StatUpdate,
    MobDetail,
    CorpseDetail,
    Unrecognized,
}

/// A classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Text {
        content: Option<String>,
        /// Set when the message also switches the input echo mode.
        mode: Option<PromptMode>,
    },
    StatUpdate(StatSnapshot),
    MobDetail(MobDetail),
    CorpseDetail(CorpseDetail),
    Unrecognized,
}

impl InboundMessage {
    /// Classifies a transport payload.
    ///
    /// Strings that do not parse to a JSON object are plain display text.
    pub fn from_raw(raw: &RawPayload) -> Self {
        match raw {
            RawPayload::Object(value) => Self::classify(value),
            RawPayload::Text(text) => match serde_json::from_str::<Value>(text) {
                Ok(value @ Value::Object(_)) => Self::classify(&value),
                _ => InboundMessage::Text {
                    content: Some(text.clone()),
                    mode: None,
                },
            },
        }
    }

    /// Classifies a parsed object. First matching rule wins:
    ///
    /// 1. `type == "TEXT"`, or a non-empty `content`/`text` field
    /// 2. `type` is `STAT_UPDATE`/`stats`, or an `hp` field is present
    /// 3. `type == "MOB_DETAIL"`
    /// 4. `type == "CORPSE_DETAIL"`
    pub fn classify(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str);
        let content = non_empty(field_text(value, "content"))
            .or_else(|| non_empty(field_text(value, "text")));

        if kind == Some("TEXT") || content.is_some() {
            let mode = match kind {
                Some("PWD_MODE") => Some(PromptMode::Masked),
                Some("USER_MODE") => Some(PromptMode::Plain),
                _ => None,
            };
            return InboundMessage::Text { content, mode };
        }

        if matches!(kind, Some("STAT_UPDATE" | "stats")) || present(value, "hp") {
            return InboundMessage::StatUpdate(StatSnapshot::from_value(value));
        }

        let payload = value.get("payload");
        match kind {
            Some("MOB_DETAIL") => InboundMessage::MobDetail(MobDetail {
                description: payload.and_then(|p| field_text(p, "description")),
                health_status: payload.and_then(|p| field_text(p, "healthStatus")),
                items: payload.map(field_items).unwrap_or_default(),
            }),
            Some("CORPSE_DETAIL") => InboundMessage::CorpseDetail(CorpseDetail {
                description: payload.and_then(|p| field_text(p, "description")),
                items: payload.map(field_items).unwrap_or_default(),
            }),
            _ => InboundMessage::Unrecognized,
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            InboundMessage::Text { .. } => MessageKind::Text,
            InboundMessage::StatUpdate(_) => MessageKind::StatUpdate,
            InboundMessage::MobDetail(_) => MessageKind::MobDetail,
            InboundMessage::CorpseDetail(_) => MessageKind::CorpseDetail,
            InboundMessage::Unrecognized => MessageKind::Unrecognized,
        }
    }
}

fn present(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(|v| !v.is_null())
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

/// Scalar fields as display text; objects, arrays and null are absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

fn field_items(payload: &Value) -> Vec<String> {
    payload
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

/// Integer fields; floats truncate and numeric strings are accepted.
fn field_int(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// How commands are framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// `{"type":"INPUT","text":"..."}`
    #[default]
    Json,
    /// The command text as-is.
    Raw,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum OutboundCommand<'a> {
    Input { text: &'a str },
}

impl Framing {
    /// Encodes a command for sending.
    pub fn encode(self, command: &str) -> String {
        match self {
            Framing::Raw => command.to_string(),
            Framing::Json => serde_json::to_string(&OutboundCommand::Input { text: command })
                .unwrap_or_else(|_| command.to_string()),
        }
    }
}
