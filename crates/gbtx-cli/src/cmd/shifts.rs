// crates/gbtx-cli/src/cmd/shifts.rs

use anyhow::Context;
use clap::Args;
use gbtx_core::shift::SHIFT_BUCKETS;
use gbtx_core::{detect_shifts, SHIFT_MISMATCH};

use super::args::{DumpArgs, LayoutArgs, PatternArgs};
use super::util::{prepare, print_input_summary, print_length_mismatch};
use crate::io::{csv, output};

#[derive(Args, Debug)]
pub struct ShiftsArgs {
    #[command(flatten)]
    pub input: DumpArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Shift series CSV (position,<channels..>) for plotting; stdout if omitted
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: ShiftsArgs) -> anyhow::Result<()> {
    let p = prepare(&args.layout, &args.input, &args.pattern)?;
    let report = detect_shifts(&p.reference, &p.parsed).context("detect shifts")?;

    let columns: Vec<&str> = p.columns.iter().map(String::as_str).collect();
    output::write_output(args.out.as_deref(), &csv::shifts_to_csv(&columns, &report))?;

    print_input_summary("shifts", &p);
    eprintln!("compared        = {}", report.compared);
    print_length_mismatch(report.length_mismatch);

    eprintln!("--- distance histogram (0=exact, 1..7=rotl, {SHIFT_MISMATCH}=mismatch) ---");
    let mut head = format!("{:<12}", "channel");
    for d in 0..SHIFT_BUCKETS {
        head.push_str(&format!(" {:>7}", format!("d{d}")));
    }
    eprintln!("{head}");
    for c in &columns {
        if let Some(h) = report.histogram(c) {
            let mut row = format!("{c:<12}");
            for n in h {
                row.push_str(&format!(" {n:>7}"));
            }
            eprintln!("{row}");
        }
    }
    if let Some(o) = args.out.as_deref() {
        eprintln!("out             = {o}");
    }

    Ok(())
}
