// crates/gbtx-cli/src/io/output.rs

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write `text` to `path` (atomically, through a temp file in the same
/// directory), or to stdout when `path` is None.
pub fn write_output(path: Option<&str>, text: &str) -> Result<()> {
    match path {
        Some(p) => write_file_atomic(p, text),
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(text.as_bytes()).context("write stdout")?;
            out.flush().context("flush stdout")?;
            Ok(())
        }
    }
}

fn write_file_atomic(path: &str, text: &str) -> Result<()> {
    let target = Path::new(path);
    let dir = match target.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(text.as_bytes())
        .with_context(|| format!("write {path}"))?;
    tmp.persist(target).with_context(|| format!("persist {path}"))?;
    Ok(())
}
