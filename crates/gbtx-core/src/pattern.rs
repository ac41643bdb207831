// crates/gbtx-core/src/pattern.rs
//
// Reference pattern generation.
//
// Fixed:  value(c, i) = v_c
// Cyclic: value(c, i) = (h_c + ((i + o) mod p_c)) mod 256
//         (Euclidean mod; +1 per step, wrapping at the channel period)

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::{Frame, Sequence};
use crate::validate::validate_pattern;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclicChannel {
    /// Value at sequence position 0 (before the global offset).
    pub head: i64,
    /// Steps before the value repeats; must be positive.
    pub period: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PatternDescriptor {
    Fixed {
        values: BTreeMap<String, i64>,
    },
    Cyclic {
        channels: BTreeMap<String, CyclicChannel>,
        #[serde(default)]
        offset: i64,
    },
}

/// Pattern file contents: a descriptor plus how many frames to generate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub length: usize,
    #[serde(flatten)]
    pub pattern: PatternDescriptor,
}

impl PatternDescriptor {
    pub fn fixed<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        PatternDescriptor::Fixed {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn cyclic<I, S>(channels: I, offset: i64) -> Self
    where
        I: IntoIterator<Item = (S, CyclicChannel)>,
        S: Into<String>,
    {
        PatternDescriptor::Cyclic {
            channels: channels.into_iter().map(|(k, c)| (k.into(), c)).collect(),
            offset,
        }
    }

    /// Channel names in name order.
    pub fn channel_names(&self) -> Vec<&str> {
        match self {
            PatternDescriptor::Fixed { values } => values.keys().map(String::as_str).collect(),
            PatternDescriptor::Cyclic { channels, .. } => channels.keys().map(String::as_str).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_pattern(self)
    }

    /// Expected value of `channel` at position `i`.
    /// None when the channel is not part of the pattern, or when its
    /// parameters are invalid (fixed value outside a byte, period <= 0).
    pub fn value_at(&self, channel: &str, i: usize) -> Option<u8> {
        match self {
            PatternDescriptor::Fixed { values } => {
                let v = *values.get(channel)?;
                u8::try_from(v).ok()
            }
            PatternDescriptor::Cyclic { channels, offset } => {
                let c = channels.get(channel)?;
                if c.period <= 0 {
                    return None;
                }
                Some(cyclic_value(*c, *offset, i))
            }
        }
    }

    /// Validated, lazy reference sequence of `len` frames.
    /// Call again for a fresh pass.
    pub fn frames(&self, len: usize) -> Result<ReferenceFrames<'_>> {
        self.validate()?;
        Ok(ReferenceFrames { pattern: self, pos: 0, len })
    }

    fn frame_at(&self, i: usize) -> Frame {
        match self {
            PatternDescriptor::Fixed { values } => {
                // validated: every value fits a byte
                Frame::from_pairs(values.iter().map(|(k, &v)| (k.as_str(), v as u8)))
            }
            PatternDescriptor::Cyclic { channels, offset } => Frame::from_pairs(
                channels
                    .iter()
                    .map(|(k, &c)| (k.as_str(), cyclic_value(c, *offset, i))),
            ),
        }
    }
}

impl PatternConfig {
    pub fn validate(&self) -> Result<()> {
        self.pattern.validate()
    }

    pub fn generate(&self) -> Result<Sequence> {
        generate(&self.pattern, self.length)
    }
}

/// Materialize `len` reference frames. Fails before producing anything if
/// the descriptor is invalid.
pub fn generate(pattern: &PatternDescriptor, len: usize) -> Result<Sequence> {
    let seq: Sequence = pattern.frames(len)?.collect();
    debug!(
        "generated {} reference frames over {} channels",
        seq.len(),
        pattern.channel_names().len()
    );
    Ok(seq)
}

/// Iterator returned by [`PatternDescriptor::frames`].
#[derive(Clone, Debug)]
pub struct ReferenceFrames<'a> {
    pattern: &'a PatternDescriptor,
    pos: usize,
    len: usize,
}

impl Iterator for ReferenceFrames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.pos >= self.len {
            return None;
        }
        let f = self.pattern.frame_at(self.pos);
        self.pos += 1;
        Some(f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.pos;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ReferenceFrames<'_> {}

#[inline]
fn cyclic_value(c: CyclicChannel, offset: i64, i: usize) -> u8 {
    debug_assert!(c.period > 0);
    let step = (i as i128 + offset as i128).rem_euclid(c.period as i128);
    (c.head as i128 + step).rem_euclid(256) as u8
}
