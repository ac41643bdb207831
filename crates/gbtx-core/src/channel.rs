// crates/gbtx-core/src/channel.rs
//
// Built-in channel sets of the GBTX memory monitor.
//
// Byte ordering of a monitor line (left to right, after the header):
//   elink6-0 elink6-1 elink5-0 elink5-1 ... elink1-0 elink1-1
// so elink1-1 is the least-significant (rightmost) byte.

use std::fmt;
use std::str::FromStr;

use crate::error::{GbtxError, Result};

/// Byte-level view: two bytes per e-link, e-links 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Elink {
    E1_0,
    E1_1,
    E2_0,
    E2_1,
    E3_0,
    E3_1,
    E4_0,
    E4_1,
    E5_0,
    E5_1,
    E6_0,
    E6_1,
}

impl Elink {
    pub const ALL: [Elink; 12] = [
        Elink::E1_0,
        Elink::E1_1,
        Elink::E2_0,
        Elink::E2_1,
        Elink::E3_0,
        Elink::E3_1,
        Elink::E4_0,
        Elink::E4_1,
        Elink::E5_0,
        Elink::E5_1,
        Elink::E6_0,
        Elink::E6_1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Elink::E1_0 => "elink1-0",
            Elink::E1_1 => "elink1-1",
            Elink::E2_0 => "elink2-0",
            Elink::E2_1 => "elink2-1",
            Elink::E3_0 => "elink3-0",
            Elink::E3_1 => "elink3-1",
            Elink::E4_0 => "elink4-0",
            Elink::E4_1 => "elink4-1",
            Elink::E5_0 => "elink5-0",
            Elink::E5_1 => "elink5-1",
            Elink::E6_0 => "elink6-0",
            Elink::E6_1 => "elink6-1",
        }
    }

    /// E-link number, 1..=6.
    #[inline]
    pub fn link(self) -> u8 {
        (self as u8) / 2 + 1
    }

    /// Byte half within the e-link: 0 (more significant) or 1.
    #[inline]
    pub fn half(self) -> u8 {
        (self as u8) % 2
    }

    /// Byte offset from the right end of the line.
    #[inline]
    pub fn right_offset(self) -> usize {
        2 * (self.link() as usize - 1) + (1 - self.half() as usize)
    }
}

/// Wider analysis view: one channel per e-group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Egroup {
    G0,
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
}

impl Egroup {
    pub const ALL: [Egroup; 7] = [
        Egroup::G0,
        Egroup::G1,
        Egroup::G2,
        Egroup::G3,
        Egroup::G4,
        Egroup::G5,
        Egroup::G6,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Egroup::G0 => "egroup0",
            Egroup::G1 => "egroup1",
            Egroup::G2 => "egroup2",
            Egroup::G3 => "egroup3",
            Egroup::G4 => "egroup4",
            Egroup::G5 => "egroup5",
            Egroup::G6 => "egroup6",
        }
    }

    /// egroupN sits N bytes from the right.
    #[inline]
    pub fn right_offset(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Elink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Egroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Elink {
    type Err = GbtxError;

    fn from_str(s: &str) -> Result<Self> {
        Elink::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| GbtxError::InvalidLayout(format!("unknown elink channel: {s}")))
    }
}

impl FromStr for Egroup {
    type Err = GbtxError;

    fn from_str(s: &str) -> Result<Self> {
        Egroup::ALL
            .iter()
            .copied()
            .find(|g| g.name() == s)
            .ok_or_else(|| GbtxError::InvalidLayout(format!("unknown egroup channel: {s}")))
    }
}
