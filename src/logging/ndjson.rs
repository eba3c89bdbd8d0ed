use crate::logging::LogEntry;
use anyhow::{Context, Result};
use serde_json::json;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub fn mirror_event(path: &Path, entry: &LogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log {}", path.display()))?;
    let line = json!({
        "seq": entry.seq,
        "ts": entry.ts,
        "run_id": entry.run_id,
        "event": entry.event,
        "detail": entry.detail
    });
    writeln!(f, "{}", line)?;
    Ok(())
}
