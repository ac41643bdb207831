// crates/gbtx-core/src/compare.rs
//
// Positional comparison of a reference sequence against parsed frames.
//
// Pairing rules (shared with the shift detector):
// - position i of reference pairs with position i of parsed
// - only min(len) positions are compared; a length difference is reported
//   in the result, never fatal
// - every compared pair must carry the same channel set

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::error::{GbtxError, Result};
use crate::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    pub reference: usize,
    pub parsed: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub num_match: usize,
    pub num_mismatch: usize,
    pub percent_match: f64,
    pub percent_mismatch: f64,
}

impl MatchStats {
    /// Percentages are 0.0 when nothing was compared.
    pub fn from_counts(num_match: usize, num_mismatch: usize) -> Self {
        let total = num_match + num_mismatch;
        let (percent_match, percent_mismatch) = if total == 0 {
            (0.0, 0.0)
        } else {
            let t = total as f64;
            (num_match as f64 * 100.0 / t, num_mismatch as f64 * 100.0 / t)
        };
        Self { num_match, num_mismatch, percent_match, percent_mismatch }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.num_match + self.num_mismatch
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchReport {
    /// Positions compared: min(len(reference), len(parsed)).
    pub compared: usize,
    pub length_mismatch: Option<LengthMismatch>,
    pub channels: BTreeMap<String, MatchStats>,
}

impl MatchReport {
    /// All channels folded into one tally.
    pub fn overall(&self) -> MatchStats {
        let (m, mm) = self
            .channels
            .values()
            .fold((0, 0), |(m, mm), s| (m + s.num_match, mm + s.num_mismatch));
        MatchStats::from_counts(m, mm)
    }

    /// Every compared value matched and the two sequences had equal length.
    pub fn is_clean(&self) -> bool {
        self.length_mismatch.is_none() && self.channels.values().all(|s| s.num_mismatch == 0)
    }
}

pub fn compare(reference: &[Frame], parsed: &[Frame]) -> Result<MatchReport> {
    let pairing = pair_up(reference, parsed)?;

    let mut channels = BTreeMap::new();
    for &c in &pairing.channels {
        let num_match = reference
            .iter()
            .zip(parsed)
            .filter(|(r, p)| r.get(c) == p.get(c))
            .count();
        channels.insert(
            c.to_string(),
            MatchStats::from_counts(num_match, pairing.compared - num_match),
        );
    }

    Ok(MatchReport {
        compared: pairing.compared,
        length_mismatch: pairing.length_mismatch,
        channels,
    })
}

pub(crate) struct Pairing<'a> {
    pub compared: usize,
    pub length_mismatch: Option<LengthMismatch>,
    /// Channel set every compared pair carries, in name order.
    pub channels: Vec<&'a str>,
}

pub(crate) fn pair_up<'a>(reference: &'a [Frame], parsed: &'a [Frame]) -> Result<Pairing<'a>> {
    let compared = reference.len().min(parsed.len());

    let length_mismatch = if reference.len() != parsed.len() {
        warn!(
            "length mismatch: reference={} parsed={}; comparing first {}",
            reference.len(),
            parsed.len(),
            compared
        );
        Some(LengthMismatch { reference: reference.len(), parsed: parsed.len() })
    } else {
        None
    };

    let template = match reference.first().or_else(|| parsed.first()) {
        Some(f) => f,
        None => {
            return Ok(Pairing { compared, length_mismatch, channels: Vec::new() });
        }
    };

    for (i, (r, p)) in reference.iter().zip(parsed).enumerate() {
        for (side, f) in [("reference", r), ("parsed", p)] {
            if !f.same_channels(template) {
                return Err(GbtxError::ChannelMismatch {
                    position: i,
                    detail: format!(
                        "{side} frame has [{}], expected [{}]",
                        join_names(f),
                        join_names(template)
                    ),
                });
            }
        }
    }

    Ok(Pairing {
        compared,
        length_mismatch,
        channels: template.channels().collect(),
    })
}

fn join_names(f: &Frame) -> String {
    f.channels().collect::<Vec<_>>().join(",")
}
