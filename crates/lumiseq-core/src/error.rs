//! Error types for sequence compilation and serial output.

use thiserror::Error;

use crate::sequence::{MAX_CHANNELS, MAX_STEPS};

/// A sequence line that failed validation.
///
/// Every variant carries the offending line as it looked after
/// normalization, together with its 1-based position in the source file.
/// The first failing line aborts the whole compile.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Fewer than two fields on the line.
    #[error("line {line_no} (`{line}`): expected channel symbols followed by a delay")]
    MalformedLine { line_no: usize, line: String },

    /// The delay field is not a positive decimal number.
    #[error("line {line_no} (`{line}`): the delay must be a positive decimal number")]
    InvalidDelay { line_no: usize, line: String },

    /// The channel field holds something other than `*` and `-`.
    #[error("line {line_no} (`{line}`): channel symbols must be `*` (on) or `-` (off)")]
    InvalidMask { line_no: usize, line: String },

    /// More channel symbols than a step record can carry.
    #[error("line {line_no} (`{line}`): at most {max} channel symbols fit in a step", max = MAX_CHANNELS)]
    MaskTooWide { line_no: usize, line: String },

    /// The delay does not fit the 16-bit wire field.
    #[error("line {line_no} (`{line}`): the delay must be at most {max} ms", max = u16::MAX)]
    DelayOutOfRange { line_no: usize, line: String },

    /// More valid steps than the one-byte step index can address.
    #[error("line {line_no} (`{line}`): a sequence holds at most {max} steps", max = MAX_STEPS)]
    SequenceTooLong { line_no: usize, line: String },
}

/// A serial transport failure. Both variants are terminal: the frame is
/// never retried and nothing is resent.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The port could not be opened.
    #[error("cannot open serial port `{port}`")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// A write or flush on the open port failed.
    #[error("serial write failed")]
    Write(#[from] std::io::Error),
}
