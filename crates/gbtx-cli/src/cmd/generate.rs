// crates/gbtx-cli/src/cmd/generate.rs

use clap::{Args, ValueEnum};
use gbtx_core::generate;

use super::args::LayoutArgs;
use super::util::{ordered_columns, pattern_mode, require_in_layout};
use crate::io::{csv, output, pattern_file};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenFormat {
    /// CSV, one row per reference frame
    Csv,
    /// Synthetic memory-monitor dump, one hex line per frame
    Hex,
}

#[derive(Args, Debug)]
pub struct GenArgs {
    /// Pattern file (.json)
    #[arg(long)]
    pub pattern: String,

    /// Override the length from the pattern file
    #[arg(long)]
    pub length: Option<usize>,

    #[arg(long, value_enum, default_value_t = GenFormat::Csv)]
    pub format: GenFormat,

    /// Header prepended to every hex line (--format hex)
    #[arg(long, default_value = "AABB")]
    pub header: String,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output path; if omitted, prints to stdout
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: GenArgs) -> anyhow::Result<()> {
    let cfg = pattern_file::load_pattern(&args.pattern)?;
    let layout = args.layout.resolve()?;
    let names = cfg.pattern.channel_names();
    let len = args.length.unwrap_or(cfg.length);
    let seq = generate(&cfg.pattern, len)?;

    let text = match args.format {
        GenFormat::Csv => {
            let cols = ordered_columns(&layout, &names);
            let cols: Vec<&str> = cols.iter().map(String::as_str).collect();
            csv::frames_to_csv(&cols, &seq)
        }
        GenFormat::Hex => {
            require_in_layout(&layout, &names)?;
            if !args.header.is_ascii() {
                anyhow::bail!("--header must be ASCII");
            }
            let mut s = String::with_capacity(seq.len() * (args.header.len() + layout.min_line_len() + 1));
            for f in &seq {
                s.push_str(&layout.render_line(&args.header, f));
                s.push('\n');
            }
            s
        }
    };
    output::write_output(args.out.as_deref(), &text)?;

    eprintln!("--- gen ---");
    eprintln!("pattern         = {} ({})", args.pattern, pattern_mode(&cfg.pattern));
    eprintln!("channels        = {}", names.len());
    eprintln!("frames          = {}", seq.len());
    eprintln!("format          = {:?}", args.format);
    if let Some(p) = args.out.as_deref() {
        eprintln!("out             = {p}");
    }

    Ok(())
}
