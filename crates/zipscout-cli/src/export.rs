use std::path::Path;

use anyhow::Context;
use zipscout_core::{ResultRow, CSV_HEADER};

/// Writes `rows` to `path` as CSV, replacing any existing file.
///
/// The header is always written, so an empty result still produces a
/// header-only file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_csv(path: &Path, rows: &[ResultRow]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
