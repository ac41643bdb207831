// crates/gbtx-core/src/layout.rs
//
// Frame layout = the channel -> byte-slot table of a monitor line.
//
// Offsets count whole bytes from the right (least-significant) end of the
// line, trailing newline excluded. A slot at offset k covers characters
//   [len - 2k - 2, len - 2k)
// Anything left of the highest slot (e.g. the "AABB" header) is ignored.

use std::fmt::Write as _;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::channel::{Egroup, Elink};
use crate::error::{GbtxError, MalformedReason, Result};
use crate::frame::Frame;
use crate::validate::validate_slots;

/// Hex characters per slot (one byte).
pub const HEX_CHARS_PER_SLOT: usize = 2;

/// Highest byte offset a slot may use. Monitor lines are a few dozen
/// characters; anything past this is a broken layout file.
pub const MAX_SLOT_OFFSET: usize = 1023;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    /// Bytes from the right end of the line.
    pub offset: usize,
}

/// On-disk layout description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub channels: Vec<Slot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    slots: Vec<Slot>,
    min_line_len: usize,
}

impl FrameLayout {
    /// Validates names (legal, unique) and offsets (unique); slot order is kept
    /// as the column order for tabular output.
    pub fn new(slots: Vec<Slot>) -> Result<Self> {
        validate_slots(&slots)?;
        Ok(Self::from_valid(slots))
    }

    pub fn from_config(cfg: LayoutConfig) -> Result<Self> {
        Self::new(cfg.channels)
    }

    /// Twelve byte-level e-link channels, elink1-0 .. elink6-1.
    pub fn elinks() -> Self {
        Self::from_valid(
            Elink::ALL
                .iter()
                .map(|e| Slot { name: e.name().to_string(), offset: e.right_offset() })
                .collect(),
        )
    }

    /// Seven e-group channels, egroup0 .. egroup6.
    pub fn egroups() -> Self {
        Self::from_valid(
            Egroup::ALL
                .iter()
                .map(|g| Slot { name: g.name().to_string(), offset: g.right_offset() })
                .collect(),
        )
    }

    fn from_valid(slots: Vec<Slot>) -> Self {
        let max_offset = slots.iter().map(|s| s.offset).max().unwrap_or(0);
        Self {
            slots,
            min_line_len: HEX_CHARS_PER_SLOT * (max_offset + 1),
        }
    }

    pub fn to_config(&self) -> LayoutConfig {
        LayoutConfig { channels: self.slots.clone() }
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    pub fn offset_of(&self, channel: &str) -> Option<usize> {
        self.slots.iter().find(|s| s.name == channel).map(|s| s.offset)
    }

    #[inline]
    pub fn contains(&self, channel: &str) -> bool {
        self.offset_of(channel).is_some()
    }

    /// Shortest line (newline excluded) that holds every slot.
    #[inline]
    pub fn min_line_len(&self) -> usize {
        self.min_line_len
    }

    /// Overwrite each slot of `template` with the frame's byte as two
    /// uppercase hex digits. Characters outside slots (header, a trailing
    /// line ending) are kept as-is; layout channels absent from `frame` are
    /// left untouched.
    pub fn patch_line(&self, template: &str, frame: &Frame) -> Result<String> {
        let body = strip_line_ending(template);
        let ending = &template[body.len()..];
        if !body.is_ascii() {
            return Err(GbtxError::InvalidLayout(
                "patch_line template must be ASCII".into(),
            ));
        }
        if body.len() < self.min_line_len {
            let widest = self.widest_slot();
            return Err(GbtxError::MalformedFrame {
                line: 0,
                channel: widest.name.clone(),
                slot: String::new(),
                reason: MalformedReason::TooShort { len: body.len(), need: self.min_line_len },
            });
        }

        let mut out = body.to_string();
        for slot in &self.slots {
            if let Some(v) = frame.get(&slot.name) {
                let r = slot_range(body.len(), slot.offset);
                out.replace_range(r, &format!("{v:02X}"));
            }
        }
        out.push_str(ending);
        Ok(out)
    }

    /// Build a line of exactly `header.len() + min_line_len()` characters.
    /// Bytes not owned by a frame channel are written as `00`.
    pub fn render_line(&self, header: &str, frame: &Frame) -> String {
        let n_bytes = self.min_line_len / HEX_CHARS_PER_SLOT;
        let mut bytes = vec![0u8; n_bytes];
        for slot in &self.slots {
            if let Some(v) = frame.get(&slot.name) {
                bytes[n_bytes - 1 - slot.offset] = v;
            }
        }

        let mut s = String::with_capacity(header.len() + self.min_line_len);
        s.push_str(header);
        for b in bytes {
            // Writing to a String never fails.
            let _ = write!(s, "{b:02X}");
        }
        s
    }

    pub(crate) fn widest_slot(&self) -> &Slot {
        // Layouts are never empty (validated / built-in).
        let mut widest = &self.slots[0];
        for s in &self.slots[1..] {
            if s.offset > widest.offset {
                widest = s;
            }
        }
        widest
    }
}

/// Character range of the slot `offset` bytes from the right of a body of
/// `len` characters. Caller guarantees `len >= 2 * (offset + 1)`.
#[inline]
pub(crate) fn slot_range(len: usize, offset: usize) -> Range<usize> {
    let end = len - HEX_CHARS_PER_SLOT * offset;
    (end - HEX_CHARS_PER_SLOT)..end
}

/// Drop one trailing "\n" and then one trailing "\r".
#[inline]
pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Byte form of [`strip_line_ending`], for raw input that may not be UTF-8.
#[inline]
pub(crate) fn strip_line_ending_bytes(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
