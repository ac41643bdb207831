// crates/gbtx-core/src/error.rs

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GbtxError>;

#[derive(Debug, Error)]
pub enum GbtxError {
    /// A line could not be mapped onto the frame layout.
    /// `line` is 1-based; `slot` is the offending substring (possibly partial).
    #[error("malformed frame at line {line}: channel {channel} slot {slot:?}: {reason}")]
    MalformedFrame {
        line: usize,
        channel: String,
        slot: String,
        reason: MalformedReason,
    },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("channel mismatch at position {position}: {detail}")]
    ChannelMismatch { position: usize, detail: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// Line (newline stripped) is shorter than the layout needs.
    TooShort { len: usize, need: usize },
    /// Slot holds something other than two hex digits.
    NonHex,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::TooShort { len, need } => {
                write!(f, "line too short ({len} chars, need {need})")
            }
            MalformedReason::NonHex => f.write_str("non-hex characters"),
        }
    }
}
