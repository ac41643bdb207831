// crates/gbtx-cli/src/cmd/parse.rs

use clap::Args;

use super::args::{DumpArgs, LayoutArgs};
use crate::io::{csv, dump, output};

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: DumpArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output CSV path; if omitted, prints to stdout
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let layout = args.layout.resolve()?;
    let report = dump::read_dump(&args.input.r#in, &layout, args.input.policy())?;

    let columns: Vec<&str> = layout.channel_names().collect();
    let text = csv::frames_to_csv(&columns, &report.frames);
    output::write_output(args.out.as_deref(), &text)?;

    eprintln!("--- parse ---");
    eprintln!("input           = {}", args.input.r#in);
    eprintln!("channels        = {}", columns.len());
    eprintln!("min_line_len    = {}", layout.min_line_len());
    eprintln!("lines_read      = {}", report.lines_read);
    eprintln!("frames          = {}", report.frames.len());
    eprintln!("skipped_lines   = {}", report.skipped.len());
    for s in &report.skipped {
        eprintln!("  line {:>6}: {}", s.line, s.error);
    }
    if let Some(p) = args.out.as_deref() {
        eprintln!("out             = {p}");
    }

    Ok(())
}
