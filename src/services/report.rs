use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use crate::error::CleanupResult;

#[derive(Debug, Serialize)]
pub struct RunReport<T> {
    pub run_id: Uuid,
    pub tool: &'static str,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: T,
}

impl<T: Serialize> RunReport<T> {
    pub fn new(tool: &'static str, started_at: DateTime<Utc>, outcome: T) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            tool,
            started_at,
            finished_at: Utc::now(),
            outcome,
        }
    }

    pub fn write_to(&self, path: &Path) -> CleanupResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Writes the report if a path was configured. Failures are logged only; the
/// run itself already finished.
pub fn persist<T: Serialize>(path: Option<&Path>, report: &RunReport<T>) {
    let Some(path) = path else {
        return;
    };

    match report.write_to(path) {
        Ok(()) => tracing::info!(path = %path.display(), run_id = %report.run_id, "run report written"),
        Err(e) => tracing::error!(path = %path.display(), error = %e, "failed to write run report"),
    }
}
