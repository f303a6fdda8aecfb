use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use redi_model::UpsertBatch;

use crate::common::ensure_parent_dir;

/// Pretty-printed JSON array of the batches.
pub fn render_json(batches: &[UpsertBatch]) -> Result<String> {
    serde_json::to_string_pretty(batches).context("serialize batches")
}

pub fn write_json(path: &Path, batches: &[UpsertBatch]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, batches).context("serialize batches")?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), batches = batches.len(), "json written");
    Ok(())
}
