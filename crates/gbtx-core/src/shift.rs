// crates/gbtx-core/src/shift.rs
//
// Bit-shift diagnosis between expected and observed bytes.
//
// Direction is LEFT rotation within 8 bits:
//   distance(e, o) = min { s in 0..=7 : e.rotate_left(s) == o }
// and SHIFT_MISMATCH (8) when no rotation reproduces `o`.
// A right rotation by r shows up as a left rotation by 8 - r.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::compare::{pair_up, LengthMismatch};
use crate::error::Result;
use crate::frame::Frame;

/// Sentinel distance: observed byte is not a rotation of the expected one.
pub const SHIFT_MISMATCH: u8 = 8;

/// Number of distinct distances, 0..=SHIFT_MISMATCH.
pub const SHIFT_BUCKETS: usize = SHIFT_MISMATCH as usize + 1;

/// Left-rotation distance from `expected` to `observed`, or `SHIFT_MISMATCH`.
/// Equal bytes are distance 0; bytes with rotational symmetry (0x55, 0x11)
/// resolve to the smallest matching distance.
#[inline]
pub fn rotation_distance(expected: u8, observed: u8) -> u8 {
    if expected == observed {
        return 0;
    }
    (1..8u32)
        .find(|&s| expected.rotate_left(s) == observed)
        .map(|s| s as u8)
        .unwrap_or(SHIFT_MISMATCH)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShiftReport {
    pub compared: usize,
    pub length_mismatch: Option<LengthMismatch>,
    /// One distance per compared position, per channel.
    pub channels: BTreeMap<String, Vec<u8>>,
}

impl ShiftReport {
    /// Count of each distance 0..=8 for `channel`.
    pub fn histogram(&self, channel: &str) -> Option<[usize; SHIFT_BUCKETS]> {
        let series = self.channels.get(channel)?;
        let mut h = [0usize; SHIFT_BUCKETS];
        for &d in series {
            h[(d as usize).min(SHIFT_BUCKETS - 1)] += 1;
        }
        Some(h)
    }

    /// Positions (per channel) that are pure rotations, distance 1..=7.
    pub fn shifted_positions(&self, channel: &str) -> Option<Vec<usize>> {
        let series = self.channels.get(channel)?;
        Some(
            series
                .iter()
                .enumerate()
                .filter(|&(_, &d)| d > 0 && d < SHIFT_MISMATCH)
                .map(|(i, _)| i)
                .collect(),
        )
    }
}

pub fn detect_shifts(reference: &[Frame], parsed: &[Frame]) -> Result<ShiftReport> {
    let pairing = pair_up(reference, parsed)?;

    let mut channels = BTreeMap::new();
    for &c in &pairing.channels {
        let series: Vec<u8> = reference
            .iter()
            .zip(parsed)
            .map(|(r, p)| match (r.get(c), p.get(c)) {
                (Some(e), Some(o)) => rotation_distance(e, o),
                // pair_up guarantees both frames carry `c`
                _ => SHIFT_MISMATCH,
            })
            .collect();
        channels.insert(c.to_string(), series);
    }

    Ok(ShiftReport {
        compared: pairing.compared,
        length_mismatch: pairing.length_mismatch,
        channels,
    })
}
