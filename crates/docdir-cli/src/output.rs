//! JSON file output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use docdir_core::Record;

/// Output path for one city: spaces become underscores, `.json` appended.
pub fn city_output_path(output_dir: &Path, city: &str) -> PathBuf {
    output_dir.join(format!("{}.json", city.replace(' ', "_")))
}

/// Writes the records as a pretty-printed JSON array, creating the parent
/// directory if needed.
pub fn write_records(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}
