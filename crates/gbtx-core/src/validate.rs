// crates/gbtx-core/src/validate.rs

use std::collections::HashSet;

use crate::error::{GbtxError, Result};
use crate::layout::{Slot, MAX_SLOT_OFFSET};
use crate::pattern::PatternDescriptor;

/// Channel names end up as CSV header cells: keep them to [A-Za-z0-9._-].
pub fn validate_channel_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GbtxError::InvalidLayout("channel name must be non-empty".into()));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(GbtxError::InvalidLayout(format!(
            "channel name {name:?} contains illegal character {c:?}"
        )));
    }
    Ok(())
}

pub fn validate_slots(slots: &[Slot]) -> Result<()> {
    if slots.is_empty() {
        return Err(GbtxError::InvalidLayout("layout has no channels".into()));
    }

    let mut names = HashSet::with_capacity(slots.len());
    let mut offsets = HashSet::with_capacity(slots.len());
    for s in slots {
        validate_channel_name(&s.name)?;
        if s.offset > MAX_SLOT_OFFSET {
            return Err(GbtxError::InvalidLayout(format!(
                "channel {} offset {} exceeds maximum {MAX_SLOT_OFFSET}",
                s.name, s.offset
            )));
        }
        if !names.insert(s.name.as_str()) {
            return Err(GbtxError::InvalidLayout(format!("duplicate channel {}", s.name)));
        }
        if !offsets.insert(s.offset) {
            return Err(GbtxError::InvalidLayout(format!(
                "channel {} reuses byte offset {}",
                s.name, s.offset
            )));
        }
    }
    Ok(())
}

pub fn validate_pattern(p: &PatternDescriptor) -> Result<()> {
    let names = p.channel_names();
    if names.is_empty() {
        return Err(GbtxError::InvalidPattern("pattern has no channels".into()));
    }
    for name in names {
        validate_channel_name(name).map_err(|e| GbtxError::InvalidPattern(e.to_string()))?;
    }

    match p {
        PatternDescriptor::Fixed { values } => {
            for (name, &v) in values {
                if !(0..=255).contains(&v) {
                    return Err(GbtxError::InvalidPattern(format!(
                        "fixed value for {name} must be in 0..=255, got {v}"
                    )));
                }
            }
        }
        PatternDescriptor::Cyclic { channels, .. } => {
            for (name, c) in channels {
                if c.period <= 0 {
                    return Err(GbtxError::InvalidPattern(format!(
                        "period for {name} must be positive, got {}",
                        c.period
                    )));
                }
            }
        }
    }

    Ok(())
}
