// crates/gbtx-cli/src/io/dump.rs

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use gbtx_core::{DecodeReport, FrameDecoder, FrameLayout, MalformedPolicy};

/// Decode a memory-monitor dump file, streaming it line by line.
pub fn read_dump(path: &str, layout: &FrameLayout, policy: MalformedPolicy) -> Result<DecodeReport> {
    let f = File::open(path).with_context(|| format!("open dump {path}"))?;
    let report = FrameDecoder::new(layout)
        .decode_all(BufReader::new(f), policy)
        .with_context(|| format!("decode dump {path}"))?;
    Ok(report)
}
