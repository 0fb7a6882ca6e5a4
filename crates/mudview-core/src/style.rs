//! Host-agnostic text styles.
//!
//! These types describe how a log line looks without depending on any
//! terminal or browser library. Hosts translate them at render time
//! (ratatui styles in the TUI, inline CSS in the HTML export).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A terminal color as produced by SGR sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 256-color palette index (`38;5;n`).
    Indexed(u8),
    /// 24-bit color (`38;2;r;g;b`).
    Rgb(u8, u8, u8),
}

/// The 16 base colors in SGR order (30..=37, then 90..=97).
const BASE_COLORS: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::BrightBlack,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightWhite,
];

/// RGB values for the 16 base colors (xterm defaults).
const BASE_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (187, 0, 0),
    (0, 187, 0),
    (187, 187, 0),
    (0, 0, 187),
    (187, 0, 187),
    (0, 187, 187),
    (187, 187, 187),
    (85, 85, 85),
    (255, 85, 85),
    (85, 255, 85),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl Color {
    /// Returns the base color for an offset in `0..8`, optionally bright.
    pub(crate) fn from_base(offset: u8, bright: bool) -> Self {
        let idx = usize::from(offset % 8) + if bright { 8 } else { 0 };
        BASE_COLORS[idx]
    }

    /// Resolves the color to concrete RGB components.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Indexed(n) => indexed_to_rgb(n),
            base => {
                let idx = BASE_COLORS.iter().position(|c| *c == base).unwrap_or(7);
                BASE_RGB[idx]
            }
        }
    }
}

fn indexed_to_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => BASE_RGB[usize::from(n)],
        16..=231 => {
            let n = n - 16;
            (
                CUBE_LEVELS[usize::from(n / 36)],
                CUBE_LEVELS[usize::from((n / 6) % 6)],
                CUBE_LEVELS[usize::from(n % 6)],
            )
        }
        232..=255 => {
            let level = 8 + (n - 232) * 10;
            (level, level, level)
        }
    }
}

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const REVERSE       = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

/// Style of one span: optional colors plus attribute flags.
///
/// `None` colors inherit from the enclosing block (see [`ColorSpec`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub modifiers: Modifiers,
}

impl SpanStyle {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }
}

/// A styled span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// Creates an empty line.
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    /// Concatenated text of all spans, without styling.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A color specification string for a whole log block, e.g. `#00FF00` or `red`.
///
/// Kept as the original string so hosts that understand richer syntax
/// (CSS) can pass it through; [`ColorSpec::to_color`] resolves the subset
/// a terminal can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorSpec(String);

impl ColorSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves `#RGB`, `#RRGGBB` and common color names.
    pub fn to_color(&self) -> Option<Color> {
        let spec = self.0.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex);
        }
        let color = match spec.to_ascii_lowercase().as_str() {
            "black" => Color::Black,
            "red" | "maroon" => Color::Red,
            "green" => Color::Green,
            "yellow" | "olive" => Color::Yellow,
            "blue" | "navy" => Color::Blue,
            "magenta" | "purple" => Color::Magenta,
            "cyan" | "teal" => Color::Cyan,
            "silver" | "lightgray" | "lightgrey" => Color::White,
            "gray" | "grey" => Color::BrightBlack,
            "lime" => Color::BrightGreen,
            "fuchsia" => Color::BrightMagenta,
            "aqua" => Color::BrightCyan,
            "white" => Color::BrightWhite,
            "orange" => Color::Rgb(255, 165, 0),
            "gold" => Color::Rgb(255, 215, 0),
            _ => return None,
        };
        Some(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |s: &str| channel(s).map(|v| v * 17);
            Some(Color::Rgb(
                expand(&hex[0..1])?,
                expand(&hex[1..2])?,
                expand(&hex[2..3])?,
            ))
        }
        _ => None,
    }
}
