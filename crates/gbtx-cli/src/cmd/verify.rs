// crates/gbtx-cli/src/cmd/verify.rs

use anyhow::Context;
use clap::Args;
use gbtx_core::decode::SkippedLine;
use gbtx_core::{compare, MatchReport, MatchStats, PatternConfig};
use serde::Serialize;

use super::args::{DumpArgs, LayoutArgs, PatternArgs};
use super::util::{prepare, print_input_summary, print_length_mismatch};
use crate::io::output;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub input: DumpArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Also write the full report as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Exit non-zero unless every value matched, lengths agreed and no line was skipped
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Serialize)]
struct VerifyJson<'a> {
    input: &'a str,
    pattern: &'a PatternConfig,
    lines_read: usize,
    frames: usize,
    skipped: &'a [SkippedLine],
    report: &'a MatchReport,
    overall: MatchStats,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let p = prepare(&args.layout, &args.input, &args.pattern)?;
    let report = compare(&p.reference, &p.parsed).context("compare reference vs parsed")?;

    print_input_summary("verify", &p);
    eprintln!("compared        = {}", report.compared);
    print_length_mismatch(report.length_mismatch);

    eprintln!("--- per channel ---");
    for c in &p.columns {
        if let Some(s) = report.channels.get(c) {
            eprintln!("{:<12} {}", c, fmt_stats(s));
        }
    }
    let overall = report.overall();
    eprintln!("--- overall ---");
    eprintln!("{:<12} {}", "all", fmt_stats(&overall));

    if let Some(path) = args.json.as_deref() {
        let doc = VerifyJson {
            input: &p.input,
            pattern: &p.pattern,
            lines_read: p.decoded.lines_read,
            frames: p.decoded.frames.len(),
            skipped: &p.decoded.skipped,
            report: &report,
            overall,
        };
        let mut text = serde_json::to_string_pretty(&doc).context("serialize verify report")?;
        text.push('\n');
        output::write_output(Some(path), &text)?;
        eprintln!("json            = {path}");
    }

    if args.strict && !(report.is_clean() && p.decoded.skipped.is_empty()) {
        anyhow::bail!(
            "verification failed: {} mismatches over {} compared frames, {} skipped lines{}",
            overall.num_mismatch,
            report.compared,
            p.decoded.skipped.len(),
            if report.length_mismatch.is_some() { ", length mismatch" } else { "" }
        );
    }

    Ok(())
}

fn fmt_stats(s: &MatchStats) -> String {
    format!(
        "match={:>8} ({:>7.3}%)  mismatch={:>8} ({:>7.3}%)",
        s.num_match, s.percent_match, s.num_mismatch, s.percent_mismatch
    )
}
