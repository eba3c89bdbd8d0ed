pub mod ndjson;

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub seq: i64,
    pub ts: String,
    pub run_id: String,
    pub event: String,
    pub detail: Value,
}

/// Sequenced step log for one pipeline run. Entries are only written when a
/// mirror path is configured.
#[derive(Debug)]
pub struct PipelineLog {
    run_id: String,
    seq: i64,
    mirror: Option<PathBuf>,
}

impl PipelineLog {
    pub fn new(mirror: Option<PathBuf>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            seq: 0,
            mirror,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn record(&mut self, event: &str, detail: Value) -> Result<()> {
        self.seq += 1;
        let Some(path) = self.mirror.as_deref() else {
            return Ok(());
        };
        let entry = LogEntry {
            seq: self.seq,
            ts: Utc::now().to_rfc3339(),
            run_id: self.run_id.clone(),
            event: event.to_string(),
            detail,
        };
        ndjson::mirror_event(path, &entry)
    }
}
