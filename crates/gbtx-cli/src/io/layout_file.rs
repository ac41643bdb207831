// crates/gbtx-cli/src/io/layout_file.rs

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use gbtx_core::{FrameLayout, LayoutConfig};

/// Load a JSON layout file: {"channels":[{"name":..,"offset":..}, ..]}
pub fn load_layout(path: &str) -> Result<FrameLayout> {
    let f = File::open(path).with_context(|| format!("open layout {path}"))?;
    let cfg: LayoutConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse layout {path}"))?;
    let layout = FrameLayout::from_config(cfg).with_context(|| format!("validate layout {path}"))?;
    Ok(layout)
}
