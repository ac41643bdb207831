// crates/gbtx-cli/src/io/csv.rs
//
// Plain CSV writers. Channel names are restricted to [A-Za-z0-9._-] by the
// core, so no quoting is needed.

use gbtx_core::{Frame, ShiftReport};

/// Header = `columns`; one row per frame; decimal cells.
/// A channel missing from a frame is written as an empty cell.
pub fn frames_to_csv(columns: &[&str], frames: &[Frame]) -> String {
    let mut s = columns.join(",");
    s.push('\n');
    for f in frames {
        for (i, c) in columns.iter().enumerate() {
            if i > 0 {
                s.push(',');
            }
            if let Some(v) = f.get(c) {
                s.push_str(&v.to_string());
            }
        }
        s.push('\n');
    }
    s
}

/// Plot input: `position,<channels..>` then one row per compared position.
pub fn shifts_to_csv(columns: &[&str], report: &ShiftReport) -> String {
    let mut s = String::from("position");
    for c in columns {
        s.push(',');
        s.push_str(c);
    }
    s.push('\n');

    for pos in 0..report.compared {
        s.push_str(&pos.to_string());
        for c in columns {
            s.push(',');
            if let Some(d) = report.channels.get(*c).and_then(|v| v.get(pos)) {
                s.push_str(&d.to_string());
            }
        }
        s.push('\n');
    }
    s
}
