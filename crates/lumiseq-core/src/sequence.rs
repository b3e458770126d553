//! Parsing of light-sequence text into validated steps.
//!
//! A sequence file holds one step per line: channel symbols (`*` = on,
//! `-` = off, most significant channel first, optionally grouped with
//! spaces for readability) followed by a hold delay in milliseconds.
//! Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! # chaser, two channels
//! * - 500
//! - * 250
//! ```

use log::debug;

use crate::error::ParseError;

/// Widest channel mask a step record can carry.
pub const MAX_CHANNELS: usize = 16;

/// Longest sequence the one-byte step index can address.
pub const MAX_STEPS: usize = 256;

/// One validated sequence line, ready for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Channel on/off bits, most significant symbol first.
    pub mask: u16,
    /// Hold time before the next step, in milliseconds. Always positive.
    pub delay_ms: u16,
    /// Zero-based position among the valid steps of the file.
    pub index: u8,
}

/// Parses a whole sequence file into steps, in file order.
///
/// The first invalid line aborts the compile; nothing parsed before it is
/// returned.
pub fn parse_sequence(text: &str) -> Result<Vec<Step>, ParseError> {
    let mut steps = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = normalize(raw);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(&line, n + 1, steps.len())?;
        debug!(
            "line {}: mask {:#06x}, delay {} ms, step {}",
            n + 1,
            step.mask,
            step.delay_ms,
            step.index
        );
        steps.push(step);
    }
    Ok(steps)
}

/// Turns tabs into spaces, collapses space runs and trims both ends, so
/// the rest of the parser only ever sees single-space separators.
fn normalize(raw: &str) -> String {
    let raw = raw.trim_matches(|c| c == '\r' || c == '\n');
    let mut line = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == ' ' || ch == '\t' {
            if !line.is_empty() && !line.ends_with(' ') {
                line.push(' ');
            }
        } else {
            line.push(ch);
        }
    }
    if line.ends_with(' ') {
        line.pop();
    }
    line
}

fn parse_step(line: &str, line_no: usize, index: usize) -> Result<Step, ParseError> {
    // Last field is the delay, everything before it belongs to the mask.
    let Some((symbols, delay)) = line.rsplit_once(' ') else {
        return Err(ParseError::MalformedLine {
            line_no,
            line: line.to_owned(),
        });
    };

    // The delay is checked before the mask, so a line that is wrong on
    // both counts reports the delay.
    let delay_ms = parse_delay(delay, line_no, line)?;
    let mask = parse_mask(symbols, line_no, line)?;

    // Indices are only handed to lines that validated.
    if index >= MAX_STEPS {
        return Err(ParseError::SequenceTooLong {
            line_no,
            line: line.to_owned(),
        });
    }

    Ok(Step {
        mask,
        delay_ms,
        index: index as u8,
    })
}

/// Folds `*`/`-` symbols into mask bits, most significant first. Spaces
/// between symbol groups are separators, not symbols.
fn parse_mask(symbols: &str, line_no: usize, line: &str) -> Result<u16, ParseError> {
    let mut mask = 0u16;
    let mut width = 0;
    for ch in symbols.chars().filter(|&ch| ch != ' ') {
        let bit = match ch {
            '*' => 1,
            '-' => 0,
            _ => {
                return Err(ParseError::InvalidMask {
                    line_no,
                    line: line.to_owned(),
                })
            }
        };
        if width == MAX_CHANNELS {
            return Err(ParseError::MaskTooWide {
                line_no,
                line: line.to_owned(),
            });
        }
        mask = mask << 1 | bit;
        width += 1;
    }
    if width == 0 {
        return Err(ParseError::InvalidMask {
            line_no,
            line: line.to_owned(),
        });
    }
    Ok(mask)
}

/// A delay is one or more ASCII digits, strictly positive, and small
/// enough for the 16-bit wire field.
fn parse_delay(field: &str, line_no: usize, line: &str) -> Result<u16, ParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidDelay {
            line_no,
            line: line.to_owned(),
        });
    }
    match field.parse::<u32>() {
        Ok(0) => Err(ParseError::InvalidDelay {
            line_no,
            line: line.to_owned(),
        }),
        Ok(ms) if ms > u16::MAX as u32 => Err(ParseError::DelayOutOfRange {
            line_no,
            line: line.to_owned(),
        }),
        Ok(ms) => Ok(ms as u16),
        // All-digit fields only fail to parse by overflowing.
        Err(_) => Err(ParseError::DelayOutOfRange {
            line_no,
            line: line.to_owned(),
        }),
    }
}
