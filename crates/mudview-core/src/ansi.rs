//! ANSI escape sequence conversion.
//!
//! Turns server text carrying SGR color codes into [`StyledLine`]s.
//! Every character that is not part of an escape sequence is kept verbatim,
//! including non-Latin scripts. Non-SGR CSI sequences (cursor movement,
//! screen clearing) and OSC sequences are dropped.
//!
//! Conversion is fallible: a sequence that never terminates, a parameter
//! that is not a number, or a truncated extended color yields an
//! [`AnsiError`]. Callers decide what to do with it (the renderer logs and
//! skips the block).

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::style::{Color, Modifiers, SpanStyle, StyledLine, StyledSpan};

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Why a sequence could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnsiErrorKind {
    /// Input ended (or a non-parameter byte appeared) before the final byte.
    UnterminatedSequence,
    /// An SGR parameter was not a number or was out of range.
    InvalidParameter(String),
    /// `38`/`48` without the components its mode requires.
    IncompleteExtendedColor,
}

/// Conversion failure with the byte offset of the offending sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiError {
    pub kind: AnsiErrorKind,
    pub offset: usize,
}

impl fmt::Display for AnsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AnsiErrorKind::UnterminatedSequence => {
                write!(f, "unterminated escape sequence at byte {}", self.offset)
            }
            AnsiErrorKind::InvalidParameter(p) => {
                write!(f, "invalid SGR parameter {p:?} at byte {}", self.offset)
            }
            AnsiErrorKind::IncompleteExtendedColor => {
                write!(f, "incomplete extended color at byte {}", self.offset)
            }
        }
    }
}

impl std::error::Error for AnsiError {}

/// Converts ANSI-tagged text into styled lines.
///
/// Lines are split on `\n`; styles carry across line breaks. A single
/// trailing newline does not produce an extra empty line, so `"\n"` is one
/// blank line.
///
/// # Errors
/// Returns an [`AnsiError`] for malformed escape sequences.
pub fn to_styled_lines(text: &str) -> Result<Vec<StyledLine>, AnsiError> {
    let mut builder = LineBuilder::default();
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            ESC => match chars.peek().map(|&(_, c)| c) {
                Some('[') => {
                    chars.next();
                    let (params, final_byte) = read_csi(&mut chars, offset)?;
                    if final_byte == 'm' {
                        let style = apply_sgr(builder.style, &params, offset)?;
                        builder.set_style(style);
                    }
                }
                Some(']') => {
                    chars.next();
                    skip_osc(&mut chars, offset)?;
                }
                // Lone ESC before another character: drop it, keep the character.
                Some(_) => {}
                None => {
                    return Err(AnsiError {
                        kind: AnsiErrorKind::UnterminatedSequence,
                        offset,
                    });
                }
            },
            '\n' => builder.break_line(),
            other => builder.push(other),
        }
    }

    Ok(builder.finish(text.ends_with('\n')))
}

/// Reads CSI parameter bytes up to and including the final byte.
fn read_csi(chars: &mut Peekable<CharIndices<'_>>, offset: usize) -> Result<(String, char), AnsiError> {
    let mut params = String::new();
    for (_, c) in chars.by_ref() {
        match c {
            '@'..='~' => return Ok((params, c)),
            ' '..='?' => params.push(c),
            _ => break,
        }
    }
    Err(AnsiError {
        kind: AnsiErrorKind::UnterminatedSequence,
        offset,
    })
}

/// Skips an OSC string terminated by BEL or ST (`ESC \`).
fn skip_osc(chars: &mut Peekable<CharIndices<'_>>, offset: usize) -> Result<(), AnsiError> {
    while let Some((_, c)) = chars.next() {
        if c == BEL {
            return Ok(());
        }
        if c == ESC && chars.peek().map(|&(_, c)| c) == Some('\\') {
            chars.next();
            return Ok(());
        }
    }
    Err(AnsiError {
        kind: AnsiErrorKind::UnterminatedSequence,
        offset,
    })
}

fn parse_params(params: &str, offset: usize) -> Result<Vec<u16>, AnsiError> {
    if params.is_empty() {
        return Ok(vec![0]);
    }
    params
        .split([';', ':'])
        .map(|p| {
            if p.is_empty() {
                return Ok(0);
            }
            p.parse::<u16>().map_err(|_| AnsiError {
                kind: AnsiErrorKind::InvalidParameter(p.to_string()),
                offset,
            })
        })
        .collect()
}

fn apply_sgr(mut style: SpanStyle, params: &str, offset: usize) -> Result<SpanStyle, AnsiError> {
    let codes = parse_params(params, offset)?;
    let mut i = 0;
    while i < codes.len() {
        let code = codes[i];
        match code {
            0 => style = SpanStyle::default(),
            1 => style.modifiers.insert(Modifiers::BOLD),
            2 => style.modifiers.insert(Modifiers::DIM),
            3 => style.modifiers.insert(Modifiers::ITALIC),
            4 => style.modifiers.insert(Modifiers::UNDERLINE),
            7 => style.modifiers.insert(Modifiers::REVERSE),
            9 => style.modifiers.insert(Modifiers::STRIKETHROUGH),
            22 => {
                style.modifiers.remove(Modifiers::BOLD);
                style.modifiers.remove(Modifiers::DIM);
            }
            23 => style.modifiers.remove(Modifiers::ITALIC),
            24 => style.modifiers.remove(Modifiers::UNDERLINE),
            27 => style.modifiers.remove(Modifiers::REVERSE),
            29 => style.modifiers.remove(Modifiers::STRIKETHROUGH),
            30..=37 => style.fg = Some(Color::from_base((code - 30) as u8, false)),
            39 => style.fg = None,
            40..=47 => style.bg = Some(Color::from_base((code - 40) as u8, false)),
            49 => style.bg = None,
            90..=97 => style.fg = Some(Color::from_base((code - 90) as u8, true)),
            100..=107 => style.bg = Some(Color::from_base((code - 100) as u8, true)),
            38 | 48 => {
                let (color, consumed) = extended_color(&codes[i + 1..], offset)?;
                if code == 38 {
                    style.fg = Some(color);
                } else {
                    style.bg = Some(color);
                }
                i += consumed;
            }
            // Blink, conceal, fonts and the rest have no visual counterpart here.
            _ => {}
        }
        i += 1;
    }
    Ok(style)
}

/// Parses the tail of a `38`/`48` code. Returns the color and how many
/// parameters it consumed.
fn extended_color(rest: &[u16], offset: usize) -> Result<(Color, usize), AnsiError> {
    let incomplete = || AnsiError {
        kind: AnsiErrorKind::IncompleteExtendedColor,
        offset,
    };
    let component = |v: u16| {
        u8::try_from(v).map_err(|_| AnsiError {
            kind: AnsiErrorKind::InvalidParameter(v.to_string()),
            offset,
        })
    };

    match rest.first() {
        Some(5) => {
            let n = rest.get(1).copied().ok_or_else(incomplete)?;
            Ok((Color::Indexed(component(n)?), 2))
        }
        Some(2) => {
            if rest.len() < 4 {
                return Err(incomplete());
            }
            let color = Color::Rgb(component(rest[1])?, component(rest[2])?, component(rest[3])?);
            Ok((color, 4))
        }
        Some(other) => Err(AnsiError {
            kind: AnsiErrorKind::InvalidParameter(other.to_string()),
            offset,
        }),
        None => Err(incomplete()),
    }
}

/// Accumulates characters into spans and lines.
#[derive(Default)]
struct LineBuilder {
    lines: Vec<StyledLine>,
    current: StyledLine,
    segment: String,
    style: SpanStyle,
}

impl LineBuilder {
    fn push(&mut self, ch: char) {
        self.segment.push(ch);
    }

    fn set_style(&mut self, style: SpanStyle) {
        if style != self.style {
            self.flush_segment();
            self.style = style;
        }
    }

    fn flush_segment(&mut self) {
        if !self.segment.is_empty() {
            self.current.spans.push(StyledSpan {
                text: std::mem::take(&mut self.segment),
                style: self.style,
            });
        }
    }

    fn break_line(&mut self) {
        self.flush_segment();
        self.lines.push(std::mem::take(&mut self.current));
    }

    fn finish(mut self, trailing_newline: bool) -> Vec<StyledLine> {
        self.flush_segment();
        // "a\n" is one line; the empty line after the final break is implied.
        if !(trailing_newline && self.current.spans.is_empty() && !self.lines.is_empty()) {
            self.lines.push(self.current);
        }
        self.lines
    }
}
