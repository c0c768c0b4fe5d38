// matrix.rs - Square distance matrix keyed by sample-id

use std::collections::HashMap;

/// Precomputed pairwise distance matrix, indexed by sample-id on both axes.
///
/// Values are finite non-negative dissimilarities. The matrix is immutable
/// after load; lookups against ids missing from the index are fatal because
/// metadata is pre-filtered to the matrix index before any selection runs.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    pub ids: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn new(ids: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self, String> {
        if values.len() != ids.len() {
            return Err(format!(
                "Distance matrix has {} rows but {} ids",
                values.len(),
                ids.len()
            ));
        }
        for (i, row) in values.iter().enumerate() {
            if row.len() != ids.len() {
                return Err(format!(
                    "Distance matrix row '{}' has {} columns, expected {}",
                    ids[i],
                    row.len(),
                    ids.len()
                ));
            }
        }

        let mut index = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(format!("Duplicate sample-id '{}' in distance matrix", id));
            }
        }

        Ok(Self { ids, index, values })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, sample_id: &str) -> bool {
        self.index.contains_key(sample_id)
    }

    /// Look up the distance between two samples.
    ///
    /// A missing id here means the metadata/matrix pre-filtering was violated,
    /// so this propagates an error instead of skipping the pair.
    pub fn get(&self, row_id: &str, col_id: &str) -> Result<f64, String> {
        let row = *self.index.get(row_id).ok_or_else(|| {
            format!(
                "Sample '{}' not found in distance matrix index (metadata/matrix mismatch)",
                row_id
            )
        })?;
        let col = *self.index.get(col_id).ok_or_else(|| {
            format!(
                "Sample '{}' not found in distance matrix index (metadata/matrix mismatch)",
                col_id
            )
        })?;
        Ok(self.values[row][col])
    }
}
