// tsv.rs - TSV loaders for sample metadata and the distance matrix

use crate::core::vocabulary::ColumnRoles;
use crate::data::matrix::DistanceMatrix;
use crate::data::metadata::{MetadataTable, SampleRecord, MISSING_VALUE};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse an integer-valued metadata cell, treating blank/NA as missing.
///
/// Values arrive as "3", "3.0" or empty depending on the exporting tool, so
/// integral floats are accepted.
fn parse_metadata_int(s: &str) -> Result<i64, String> {
    let cleaned = s.trim();
    if cleaned.is_empty() || cleaned == "NA" || cleaned == "NaN" {
        return Ok(MISSING_VALUE);
    }
    if let Ok(v) = cleaned.parse::<i64>() {
        return Ok(v);
    }
    let v = cleaned
        .parse::<f64>()
        .map_err(|_| format!("Failed to parse '{}' as an integer", cleaned))?;
    if v.fract() != 0.0 {
        return Err(format!("Value '{}' is not a whole number", cleaned));
    }
    Ok(v as i64)
}

impl MetadataTable {
    /// Load sample metadata from a delimited text file.
    ///
    /// Required columns are located by header name via `columns`; comment rows
    /// (sample-id starting with `#`) are skipped entirely.
    pub fn from_file(file_path: &Path, sep: char, columns: &ColumnRoles) -> Result<Self, String> {
        let file = File::open(file_path)
            .map_err(|e| format!("Failed to open metadata file '{}': {}", file_path.display(), e))?;
        let table = Self::from_reader(BufReader::new(file), sep, columns)?;
        println!("✅ Metadata loaded: {} samples", table.len());
        Ok(table)
    }

    /// Load sample metadata from any buffered reader (also the test seam)
    pub fn from_reader<R: BufRead>(
        reader: R,
        sep: char,
        columns: &ColumnRoles,
    ) -> Result<Self, String> {
        let mut lines = reader.lines();

        let header_line = lines
            .next()
            .ok_or("Empty metadata file")?
            .map_err(|e| format!("Failed to read metadata header: {}", e))?;
        let header: Vec<&str> = header_line.split(sep).map(|s| s.trim()).collect();

        let find = |name: &str| -> Result<usize, String> {
            header
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| format!("Metadata is missing required column '{}'", name))
        };
        let id_col = find(&columns.sample_id)?;
        let bucket_col = find(&columns.bucket)?;
        let type_col = find(&columns.sample_type)?;
        let time_col = find(&columns.time_point)?;

        let mut records = Vec::new();
        for (line_num, line) in lines.enumerate() {
            let line =
                line.map_err(|e| format!("Failed to read metadata line {}: {}", line_num + 2, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(sep).collect();
            if parts.len() != header.len() {
                return Err(format!(
                    "Metadata line {} has {} fields, expected {}",
                    line_num + 2,
                    parts.len(),
                    header.len()
                ));
            }

            let sample_id = parts[id_col].trim();
            // Comment rows carry type annotations, not samples
            if sample_id.starts_with('#') {
                continue;
            }

            let bucket = parse_metadata_int(parts[bucket_col]).map_err(|e| {
                format!(
                    "Invalid '{}' value at metadata line {}: {}",
                    columns.bucket,
                    line_num + 2,
                    e
                )
            })?;
            let time_point = parse_metadata_int(parts[time_col]).map_err(|e| {
                format!(
                    "Invalid '{}' value at metadata line {}: {}",
                    columns.time_point,
                    line_num + 2,
                    e
                )
            })?;

            records.push(SampleRecord {
                sample_id: sample_id.to_string(),
                bucket,
                time_point,
                sample_type: parts[type_col].trim().to_string(),
            });
        }

        Ok(MetadataTable::new(records))
    }
}

impl DistanceMatrix {
    /// Load a square tab-separated distance matrix.
    ///
    /// First header cell is the index-column label and is ignored; row labels
    /// must match the column labels in order.
    pub fn from_file(file_path: &Path) -> Result<Self, String> {
        let file = File::open(file_path).map_err(|e| {
            format!(
                "Failed to open distance matrix '{}': {}",
                file_path.display(),
                e
            )
        })?;
        let matrix = Self::from_reader(BufReader::new(file))?;
        println!("✅ Distance matrix loaded: {0} × {0} samples", matrix.len());
        Ok(matrix)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, String> {
        let mut lines = reader.lines();

        let header_line = lines
            .next()
            .ok_or("Empty distance matrix file")?
            .map_err(|e| format!("Failed to read matrix header: {}", e))?;
        let header: Vec<&str> = header_line.split('\t').collect();
        if header.len() < 2 {
            return Err("Distance matrix header must have at least 2 columns".to_string());
        }
        let ids: Vec<String> = header[1..].iter().map(|s| s.trim().to_string()).collect();

        let mut values = Vec::with_capacity(ids.len());
        for (line_num, line) in lines.enumerate() {
            let line =
                line.map_err(|e| format!("Failed to read matrix line {}: {}", line_num + 2, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() != header.len() {
                return Err(format!(
                    "Matrix line {} has {} fields, expected {}",
                    line_num + 2,
                    parts.len(),
                    header.len()
                ));
            }

            let row_idx = values.len();
            let row_id = parts[0].trim();
            if row_idx >= ids.len() || row_id != ids[row_idx] {
                return Err(format!(
                    "Matrix row label '{}' at line {} does not match column label '{}'",
                    row_id,
                    line_num + 2,
                    ids.get(row_idx).map(String::as_str).unwrap_or("<none>")
                ));
            }

            let mut row = Vec::with_capacity(ids.len());
            for (i, cell) in parts[1..].iter().enumerate() {
                let value = cell.trim().parse::<f64>().map_err(|_| {
                    format!(
                        "Invalid distance '{}' at line {} column '{}'",
                        cell,
                        line_num + 2,
                        ids[i]
                    )
                })?;
                if !value.is_finite() || value < 0.0 {
                    return Err(format!(
                        "Distance at line {} column '{}' must be finite and non-negative, got {}",
                        line_num + 2,
                        ids[i],
                        value
                    ));
                }
                row.push(value);
            }
            values.push(row);
        }

        if values.len() != ids.len() {
            return Err(format!(
                "Distance matrix has {} rows but {} columns",
                values.len(),
                ids.len()
            ));
        }

        DistanceMatrix::new(ids, values)
    }
}
