// crates/gbtx-core/src/frame.rs

use std::collections::btree_map;
use std::collections::BTreeMap;

/// One snapshot of every channel's byte value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    values: BTreeMap<String, u8>,
}

/// Frames in input (or generation) order.
pub type Sequence = Vec<Frame>;

impl Frame {
    /// Later duplicates overwrite earlier ones; layouts and descriptors
    /// reject duplicate names before frames are built.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    #[inline]
    pub fn get(&self, channel: &str) -> Option<u8> {
        self.values.get(channel).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Channel names in name order.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// True when both frames carry exactly the same channel names.
    pub fn same_channels(&self, other: &Frame) -> bool {
        self.values.len() == other.values.len() && self.values.keys().eq(other.values.keys())
    }

    /// Keep only `channels`; names this frame does not carry are ignored.
    pub fn project<'a, I>(&self, channels: I) -> Frame
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = BTreeMap::new();
        for c in channels {
            if let Some((k, v)) = self.values.get_key_value(c) {
                values.insert(k.clone(), *v);
            }
        }
        Frame { values }
    }

    pub(crate) fn insert(&mut self, channel: String, value: u8) {
        self.values.insert(channel, value);
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = (&'a String, &'a u8);
    type IntoIter = btree_map::Iter<'a, String, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
