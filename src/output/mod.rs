// mod.rs - Output artifacts module

use crate::core::batch::BucketReport;
use crate::core::selector::CategoryDistances;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}

/// Write one bucket's grouped distances as a JSON artifact.
///
/// The shape is a plain `{category: [values]}` object, which is what the
/// downstream figure code consumes, so run provenance goes into the separate
/// run summary instead of this file.
pub fn write_distances(file_path: &Path, distances: &CategoryDistances) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, distances)
        .map_err(|e| format!("Failed to serialize distances: {}", e))?;
    writer
        .flush()
        .map_err(|e| format!("Flush error for '{}': {}", file_path.display(), e))?;
    Ok(())
}

/// Provenance and diagnostics for one batch run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub generated: String,
    pub command_line: String,
    pub metadata_samples: usize,
    pub rows_dropped_not_in_matrix: usize,
    pub matrix_samples: usize,
    pub buckets: Vec<BucketReport>,
}

impl RunSummary {
    pub fn new(
        command_line: &str,
        metadata_samples: usize,
        rows_dropped_not_in_matrix: usize,
        matrix_samples: usize,
        buckets: Vec<BucketReport>,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: chrono::Utc::now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            command_line: command_line.to_string(),
            metadata_samples,
            rows_dropped_not_in_matrix,
            matrix_samples,
            buckets,
        }
    }
}

/// Write the run summary sidecar next to the per-bucket artifacts
pub fn write_run_summary(output_dir: &Path, summary: &RunSummary) -> Result<(), String> {
    let file_path = output_dir.join("run-summary.json");
    ensure_parent_dir(&file_path)?;
    let content = serde_json::to_string_pretty(summary)
        .map_err(|e| format!("Failed to serialize run summary: {}", e))?;
    std::fs::write(&file_path, content)
        .map_err(|e| format!("Failed to write run summary '{}': {}", file_path.display(), e))?;
    println!("📁 Run summary written to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_write_distances_roundtrip() {
        let mut distances: CategoryDistances = BTreeMap::new();
        distances.insert("fecal".to_string(), vec![0.1, 0.2]);
        distances.insert("soil".to_string(), vec![]);

        let dir = std::env::temp_dir().join(format!(
            "compodist-output-test-{}",
            std::process::id()
        ));
        let path = dir.join("distances-bucket-7.json");
        write_distances(&path, &distances).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["fecal"][1], 0.2);
        assert_eq!(parsed["soil"].as_array().unwrap().len(), 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
