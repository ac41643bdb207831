// crates/gbtx-cli/src/io/pattern_file.rs

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use gbtx_core::PatternConfig;

/// Load a JSON pattern file and validate the descriptor.
pub fn load_pattern(path: &str) -> Result<PatternConfig> {
    let f = File::open(path).with_context(|| format!("open pattern {path}"))?;
    let cfg: PatternConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse pattern {path}"))?;
    cfg.validate().with_context(|| format!("validate pattern {path}"))?;
    Ok(cfg)
}
