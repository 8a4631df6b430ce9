use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::SummaryRecord;

/// Write the dataset as a pretty-printed JSON array, replacing any previous file.
pub fn save_dataset(records: &[SummaryRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(records).context("Failed to serialize summaries")?;

    fs::write(path, json)
        .with_context(|| format!("Failed to write summaries file: {}", path.display()))?;

    Ok(())
}
