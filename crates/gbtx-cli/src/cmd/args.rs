// crates/gbtx-cli/src/cmd/args.rs

use clap::{Args, ValueEnum};
use gbtx_core::{FrameLayout, MalformedPolicy};

use crate::io::layout_file;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutPreset {
    /// 12 byte-level channels elink1-0 .. elink6-1 (elink1-1 rightmost)
    Elink,
    /// 7 channels egroup0 .. egroup6 (egroup0 rightmost)
    Egroup,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Built-in channel layout
    #[arg(long, value_enum, default_value_t = LayoutPreset::Elink)]
    pub layout: LayoutPreset,

    /// JSON layout file ({"channels":[{"name":..,"offset":..}]}); overrides --layout
    #[arg(long)]
    pub layout_file: Option<String>,
}

impl LayoutArgs {
    pub fn resolve(&self) -> anyhow::Result<FrameLayout> {
        if let Some(p) = self.layout_file.as_deref() {
            return layout_file::load_layout(p);
        }
        Ok(match self.layout {
            LayoutPreset::Elink => FrameLayout::elinks(),
            LayoutPreset::Egroup => FrameLayout::egroups(),
        })
    }
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Memory-monitor dump (one hex frame per line)
    #[arg(long)]
    pub r#in: String,

    /// Skip malformed lines (they are listed in the summary) instead of aborting
    #[arg(long, default_value_t = false)]
    pub skip_malformed: bool,
}

impl DumpArgs {
    pub fn policy(&self) -> MalformedPolicy {
        if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        }
    }
}

#[derive(Args, Debug)]
pub struct PatternArgs {
    /// Pattern file (.json): {"mode":"fixed"|"cyclic","length":N,...}
    #[arg(long)]
    pub pattern: String,

    /// Override the reference length from the pattern file
    #[arg(long)]
    pub length: Option<usize>,

    /// Generate exactly as many reference frames as were decoded
    #[arg(long, default_value_t = false, conflicts_with = "length")]
    pub match_input_length: bool,
}
