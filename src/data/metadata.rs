// metadata.rs - Sample metadata table

use crate::data::DistanceMatrix;
use regex::Regex;

/// Sentinel for a missing bucket id or composting time point. Never matches a
/// real bucket and is never selected as a valid time point.
pub const MISSING_VALUE: i64 = -1;

/// One normalized metadata row
#[derive(Debug, Clone)]
pub struct SampleRecord {
    pub sample_id: String,
    pub bucket: i64,
    pub time_point: i64,
    pub sample_type: String,
}

/// Ordered collection of sample metadata rows.
///
/// Row order is the file order; the selector's stable sort uses it for
/// tie-breaking on equal time points.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    pub records: Vec<SampleRecord>,
}

impl MetadataTable {
    pub fn new(records: Vec<SampleRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only rows whose sample-id appears in the distance matrix index.
    ///
    /// Returns the filtered table and the number of dropped rows. Dropping is
    /// the upstream-preserved behavior; the count is surfaced so the batch
    /// driver can report it instead of discarding rows silently.
    pub fn restrict_to_matrix(self, matrix: &DistanceMatrix) -> (Self, usize) {
        let before = self.records.len();
        let records: Vec<SampleRecord> = self
            .records
            .into_iter()
            .filter(|r| matrix.contains(&r.sample_id))
            .collect();
        let dropped = before - records.len();
        (Self { records }, dropped)
    }

    /// Apply optional include/exclude sample-id regex filters
    pub fn apply_sample_filters(
        self,
        include: Option<&Regex>,
        exclude: Option<&Regex>,
    ) -> Self {
        if include.is_none() && exclude.is_none() {
            return self;
        }
        let records: Vec<SampleRecord> = self
            .records
            .into_iter()
            .filter(|r| {
                if let Some(re) = include {
                    if !re.is_match(&r.sample_id) {
                        return false;
                    }
                }
                if let Some(re) = exclude {
                    if re.is_match(&r.sample_id) {
                        return false;
                    }
                }
                true
            })
            .collect();
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, bucket: i64, time_point: i64, sample_type: &str) -> SampleRecord {
        SampleRecord {
            sample_id: id.to_string(),
            bucket,
            time_point,
            sample_type: sample_type.to_string(),
        }
    }

    #[test]
    fn test_restrict_to_matrix_reports_dropped() {
        let matrix = DistanceMatrix::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![0.0, 0.1], vec![0.1, 0.0]],
        )
        .unwrap();

        let table = MetadataTable::new(vec![
            record("a", 1, 1, "Compost Post-Roll"),
            record("missing", 1, 2, "Compost Post-Roll"),
            record("b", 2, 1, "Soil"),
        ]);

        let (filtered, dropped) = table.restrict_to_matrix(&matrix);
        assert_eq!(dropped, 1);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.records.iter().all(|r| r.sample_id != "missing"));
        // Original row order preserved
        assert_eq!(filtered.records[0].sample_id, "a");
        assert_eq!(filtered.records[1].sample_id, "b");
    }

    #[test]
    fn test_sample_filters() {
        let table = MetadataTable::new(vec![
            record("bucket.2.week1", 2, 1, "Compost Post-Roll"),
            record("bucket.2.week2", 2, 2, "Compost Post-Roll"),
            record("control.blank", -1, -1, "Control"),
        ]);

        let include = Regex::new("^bucket").unwrap();
        let filtered = table.clone().apply_sample_filters(Some(&include), None);
        assert_eq!(filtered.len(), 2);

        let exclude = Regex::new("week2").unwrap();
        let filtered = table.clone().apply_sample_filters(None, Some(&exclude));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.records.iter().all(|r| r.sample_id != "bucket.2.week2"));

        let filtered = table.apply_sample_filters(Some(&include), Some(&exclude));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records[0].sample_id, "bucket.2.week1");
    }
}
