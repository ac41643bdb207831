// crates/gbtx-cli/src/cmd/util.rs

use gbtx_core::decode::DecodeReport;
use gbtx_core::{generate, FrameLayout, LengthMismatch, PatternConfig, PatternDescriptor, Sequence};
use log::debug;

use super::args::{DumpArgs, LayoutArgs, PatternArgs};
use crate::io::{dump, pattern_file};

/// Everything verify/shifts need: decoded input projected onto the pattern's
/// channels, plus the generated reference.
pub struct Prepared {
    pub input: String,
    pub decoded: DecodeReport,
    pub pattern: PatternConfig,
    pub reference: Sequence,
    pub parsed: Sequence,
    /// Pattern channels in layout order.
    pub columns: Vec<String>,
}

pub fn prepare(layout: &LayoutArgs, input: &DumpArgs, pattern: &PatternArgs) -> anyhow::Result<Prepared> {
    let layout = layout.resolve()?;
    let cfg = pattern_file::load_pattern(&pattern.pattern)?;
    let names = cfg.pattern.channel_names();
    require_in_layout(&layout, &names)?;

    let decoded = dump::read_dump(&input.r#in, &layout, input.policy())?;

    let len = if pattern.match_input_length {
        decoded.frames.len()
    } else {
        pattern.length.unwrap_or(cfg.length)
    };
    debug!(
        "reference length {len} ({} mode, {} channels); decoded {} frames",
        pattern_mode(&cfg.pattern),
        names.len(),
        decoded.frames.len()
    );
    let reference = generate(&cfg.pattern, len)?;
    let parsed: Sequence = decoded
        .frames
        .iter()
        .map(|f| f.project(names.iter().copied()))
        .collect();
    let columns = ordered_columns(&layout, &names);

    Ok(Prepared {
        input: input.r#in.clone(),
        decoded,
        pattern: cfg,
        reference,
        parsed,
        columns,
    })
}

pub fn require_in_layout(layout: &FrameLayout, names: &[&str]) -> anyhow::Result<()> {
    let unknown: Vec<&str> = names.iter().copied().filter(|n| !layout.contains(n)).collect();
    if !unknown.is_empty() {
        anyhow::bail!(
            "pattern channels not in layout: {} (layout has: {})",
            unknown.join(","),
            layout.channel_names().collect::<Vec<_>>().join(",")
        );
    }
    Ok(())
}

/// Layout order first; names the layout does not know keep their given order.
pub fn ordered_columns(layout: &FrameLayout, names: &[&str]) -> Vec<String> {
    let mut cols: Vec<String> = layout
        .channel_names()
        .filter(|c| names.contains(c))
        .map(str::to_string)
        .collect();
    for n in names {
        if !layout.contains(n) {
            cols.push(n.to_string());
        }
    }
    cols
}

pub fn pattern_mode(p: &PatternDescriptor) -> &'static str {
    match p {
        PatternDescriptor::Fixed { .. } => "fixed",
        PatternDescriptor::Cyclic { .. } => "cyclic",
    }
}

pub fn print_input_summary(title: &str, p: &Prepared) {
    eprintln!("--- {title} ---");
    eprintln!("input           = {}", p.input);
    eprintln!("lines_read      = {}", p.decoded.lines_read);
    eprintln!("frames          = {}", p.decoded.frames.len());
    eprintln!("skipped_lines   = {}", p.decoded.skipped.len());
    for s in &p.decoded.skipped {
        eprintln!("  line {:>6}: {}", s.line, s.error);
    }
    eprintln!("pattern         = {}", pattern_mode(&p.pattern.pattern));
    eprintln!("channels        = {}", p.columns.len());
    eprintln!("reference_len   = {}", p.reference.len());
}

pub fn print_length_mismatch(lm: Option<LengthMismatch>) {
    if let Some(lm) = lm {
        eprintln!(
            "length_mismatch = reference={} parsed={} (compared the first {})",
            lm.reference,
            lm.parsed,
            lm.reference.min(lm.parsed)
        );
    }
}
