// crates/gbtx-cli/tests/cli_verify.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn repo_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(rel)
}

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gbtx-cli"))
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("spawn command")
}

fn run_ok(cmd: &mut Command) -> Output {
    let out = run(cmd);
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn s(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

#[test]
fn parse_writes_csv_in_layout_order() {
    let dir = TempDir::new().expect("tempdir");
    let csv_path = dir.path().join("fixed.csv");
    let input = repo_path("samples/mem_mon_fixed.txt");

    run_ok(cli().args(["parse", "--in", s(&input), "--out", s(&csv_path)]));

    let text = fs::read_to_string(&csv_path).expect("read csv");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("elink1-0,elink1-1,elink2-0,elink2-1,elink3-0,elink3-1,elink4-0,elink4-1,elink5-0,elink5-1,elink6-0,elink6-1")
    );
    assert_eq!(lines.next(), Some("18,52,86,120,154,188,222,240,15,30,45,60"));
    assert_eq!(text.lines().count(), 21);
}

#[test]
fn parse_to_stdout_with_custom_layout_file() {
    let input = repo_path("samples/mem_mon_fixed.txt");
    let layout = repo_path("samples/layout_two_bytes.json");

    let out = run_ok(cli().args(["parse", "--in", s(&input), "--layout-file", s(&layout)]));
    let text = String::from_utf8_lossy(&out.stdout);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("lo,hi"));
    assert_eq!(lines.next(), Some("52,18"));
}

#[test]
fn verify_reports_the_two_injected_errors() {
    let dir = TempDir::new().expect("tempdir");
    let json_path = dir.path().join("report.json");
    let input = repo_path("samples/mem_mon_fixed.txt");
    let pattern = repo_path("samples/pattern_fixed.json");

    let out = run_ok(cli().args([
        "verify",
        "--in",
        s(&input),
        "--pattern",
        s(&pattern),
        "--json",
        s(&json_path),
    ]));
    let err = stderr(&out);
    assert!(err.contains("compared        = 20"), "{err}");

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read json")).expect("parse json");
    let ch = &doc["report"]["channels"];
    assert_eq!(ch["elink3-0"]["num_match"], 19);
    assert_eq!(ch["elink3-0"]["num_mismatch"], 1);
    assert_eq!(ch["elink1-1"]["num_mismatch"], 1);
    assert_eq!(ch["elink6-1"]["num_mismatch"], 0);
    assert_eq!(doc["overall"]["num_match"], 238);
    assert_eq!(doc["overall"]["num_mismatch"], 2);
    assert!(doc["report"]["length_mismatch"].is_null());
}

#[test]
fn verify_strict_fails_on_mismatch() {
    let input = repo_path("samples/mem_mon_fixed.txt");
    let pattern = repo_path("samples/pattern_fixed.json");

    let out = run(cli().args(["verify", "--in", s(&input), "--pattern", s(&pattern), "--strict"]));
    assert!(!out.status.success());
    assert!(stderr(&out).contains("verification failed"));
}

#[test]
fn cyclic_egroup_sample_is_clean() {
    let input = repo_path("samples/mem_mon_cyclic.txt");
    let pattern = repo_path("samples/pattern_cyclic.json");

    let out = run_ok(cli().args([
        "verify",
        "--in",
        s(&input),
        "--pattern",
        s(&pattern),
        "--layout",
        "egroup",
        "--strict",
    ]));
    assert!(stderr(&out).contains("100.000%"));
}

#[test]
fn length_override_is_reported_as_mismatch() {
    let input = repo_path("samples/mem_mon_cyclic.txt");
    let pattern = repo_path("samples/pattern_cyclic.json");

    let out = run_ok(cli().args([
        "verify",
        "--in",
        s(&input),
        "--pattern",
        s(&pattern),
        "--layout",
        "egroup",
        "--length",
        "10",
    ]));
    let err = stderr(&out);
    assert!(err.contains("length_mismatch = reference=10 parsed=32"), "{err}");
    assert!(err.contains("compared        = 10"), "{err}");
}

#[test]
fn shifts_csv_marks_rotation_and_mismatch() {
    let dir = TempDir::new().expect("tempdir");
    let out_path = dir.path().join("shifts.csv");
    let input = repo_path("samples/mem_mon_fixed.txt");
    let pattern = repo_path("samples/pattern_fixed.json");

    run_ok(cli().args([
        "shifts",
        "--in",
        s(&input),
        "--pattern",
        s(&pattern),
        "--out",
        s(&out_path),
    ]));

    let text = fs::read_to_string(&out_path).expect("read shifts");
    let rows: Vec<Vec<&str>> = text.lines().map(|l| l.split(',').collect()).collect();
    assert_eq!(rows[0][0], "position");
    let col = |name: &str| rows[0].iter().position(|c| *c == name).expect("column");

    assert_eq!(rows.len(), 21);
    // row i + 1 holds position i
    assert_eq!(rows[5][col("elink3-0")], "1");
    assert_eq!(rows[12][col("elink1-1")], "8");
    assert_eq!(rows[1][col("elink1-1")], "0");
}

#[test]
fn gen_hex_roundtrips_through_verify() {
    let dir = TempDir::new().expect("tempdir");
    let dump_path = dir.path().join("synthetic.txt");
    let pattern = repo_path("samples/pattern_cyclic.json");

    run_ok(cli().args([
        "gen",
        "--pattern",
        s(&pattern),
        "--format",
        "hex",
        "--layout",
        "egroup",
        "--out",
        s(&dump_path),
    ]));

    let synthetic = fs::read_to_string(&dump_path).expect("read dump");
    let sample = fs::read_to_string(repo_path("samples/mem_mon_cyclic.txt")).expect("read sample");
    // egroup layout spans 7 bytes; the sample pads to 12 with zero bytes
    for (a, b) in synthetic.lines().zip(sample.lines()) {
        assert_eq!(&a[4..], &b[b.len() - 14..]);
    }

    run_ok(cli().args([
        "verify",
        "--in",
        s(&dump_path),
        "--pattern",
        s(&pattern),
        "--layout",
        "egroup",
        "--strict",
    ]));
}

#[test]
fn gen_csv_uses_layout_order() {
    let pattern = repo_path("samples/pattern_fixed.json");
    let out = run_ok(cli().args(["gen", "--pattern", s(&pattern), "--length", "2"]));
    let text = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("elink1-0,elink1-1,elink2-0"));
    assert_eq!(lines[1], lines[2]);
}

#[test]
fn malformed_line_aborts_unless_skipped() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("bad.txt");
    fs::write(
        &input,
        "AABB2D3C0F1EDEF09ABC56781234\nAABB2D3C0F1EDEF09ABC5678XX34\n\nAABB2D3C0F1EDEF09ABC56781234\n",
    )
    .expect("write input");

    let out = run(cli().args(["parse", "--in", s(&input)]));
    assert!(!out.status.success());
    let err = stderr(&out);
    assert!(err.contains("line 2"), "{err}");
    assert!(err.contains("elink1-0"), "{err}");

    let out = run_ok(cli().args(["parse", "--in", s(&input), "--skip-malformed"]));
    let err = stderr(&out);
    assert!(err.contains("skipped_lines   = 1"), "{err}");
    assert!(err.contains("frames          = 2"), "{err}");
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 3);
}

#[test]
fn pattern_channel_outside_layout_is_rejected() {
    let input = repo_path("samples/mem_mon_fixed.txt");
    let pattern = repo_path("samples/pattern_cyclic.json");

    let out = run(cli().args(["verify", "--in", s(&input), "--pattern", s(&pattern)]));
    assert!(!out.status.success());
    assert!(stderr(&out).contains("not in layout"));
}

#[test]
fn match_input_length_overrides_short_pattern() {
    let dir = TempDir::new().expect("tempdir");
    let short = dir.path().join("pattern_short.json");
    let text = fs::read_to_string(repo_path("samples/pattern_fixed.json")).expect("read pattern");
    assert!(text.contains("\"length\": 20"));
    fs::write(&short, text.replace("\"length\": 20", "\"length\": 5")).expect("write pattern");
    let input = repo_path("samples/mem_mon_fixed.txt");

    let out = run_ok(cli().args(["verify", "--in", s(&input), "--pattern", s(&short)]));
    let err = stderr(&out);
    assert!(err.contains("length_mismatch = reference=5 parsed=20"), "{err}");

    let out = run_ok(cli().args([
        "verify",
        "--in",
        s(&input),
        "--pattern",
        s(&short),
        "--match-input-length",
    ]));
    let err = stderr(&out);
    assert!(err.contains("reference_len   = 20"), "{err}");
    assert!(err.contains("compared        = 20"), "{err}");
    assert!(!err.contains("length_mismatch"), "{err}");
}
