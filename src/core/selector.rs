// selector.rs - Bucket-vs-reference distance selection

use crate::core::vocabulary::{RollStage, Vocabulary};
use crate::data::{DistanceMatrix, MetadataTable};
use std::collections::BTreeMap;

/// Parameters for one bucket's selection
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest {
    /// Bucket to compare
    pub bucket_id: i64,
    /// Number of time points to take from the chosen end of the series
    pub n: usize,
    /// Which composting stage of the bucket samples to use
    pub roll_stage: RollStage,
    /// Take the earliest n time points instead of the latest n
    pub from_beginning: bool,
    /// Restrict bucket-scoped categories (fecal) to this bucket's own samples
    pub own_fecal: bool,
}

/// Grouped distances for one bucket: category name -> selected values
pub type CategoryDistances = BTreeMap<String, Vec<f64>>;

/// Selects bucket samples by time point and looks up their distances to every
/// sample in each comparison category.
///
/// Pure and single-pass; the metadata handed in must already be restricted to
/// the distance matrix index, so every lookup is expected to hit.
#[derive(Debug, Clone, Default)]
pub struct DistanceSelector {
    vocabulary: Vocabulary,
}

impl DistanceSelector {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Sample-ids of the requested bucket at the requested stage, ordered by
    /// time point (latest-first unless `from_beginning`), truncated to n.
    ///
    /// Fewer than n matching rows is a normal boundary case, not an error.
    pub fn bucket_sample_ids(
        &self,
        metadata: &MetadataTable,
        request: &SelectionRequest,
    ) -> Vec<String> {
        let stage_label = self.vocabulary.bucket_label(request.roll_stage);

        let mut rows: Vec<(&str, i64)> = metadata
            .records
            .iter()
            .filter(|r| r.bucket == request.bucket_id && r.sample_type == stage_label)
            .map(|r| (r.sample_id.as_str(), r.time_point))
            .collect();

        // Stable sort keeps original row order on equal time points
        if request.from_beginning {
            rows.sort_by_key(|&(_, t)| t);
        } else {
            rows.sort_by_key(|&(_, t)| std::cmp::Reverse(t));
        }

        rows.into_iter()
            .take(request.n)
            .map(|(id, _)| id.to_string())
            .collect()
    }

    /// Sample-ids belonging to one comparison category, in metadata row order
    fn category_sample_ids(
        &self,
        metadata: &MetadataTable,
        label: &str,
        bucket_scoped: bool,
        request: &SelectionRequest,
    ) -> Vec<String> {
        metadata
            .records
            .iter()
            .filter(|r| r.sample_type == label)
            .filter(|r| !(bucket_scoped && request.own_fecal) || r.bucket == request.bucket_id)
            .map(|r| r.sample_id.clone())
            .collect()
    }

    /// Select distances for one bucket.
    ///
    /// Output always carries every category key, possibly with an empty list;
    /// each list has length |bucket sample-ids| × |category sample-ids|, in
    /// bucket-sample-major order.
    pub fn select(
        &self,
        metadata: &MetadataTable,
        matrix: &DistanceMatrix,
        request: &SelectionRequest,
    ) -> Result<CategoryDistances, String> {
        let bucket_ids = self.bucket_sample_ids(metadata, request);

        let comparisons: Vec<(&str, Vec<String>)> = self
            .vocabulary
            .categories
            .iter()
            .map(|cat| {
                (
                    cat.name.as_str(),
                    self.category_sample_ids(metadata, &cat.label, cat.bucket_scoped, request),
                )
            })
            .collect();

        let mut distances: CategoryDistances = comparisons
            .iter()
            .map(|(name, _)| (name.to_string(), Vec::new()))
            .collect();

        for bucket_sample_id in &bucket_ids {
            for (name, comp_ids) in &comparisons {
                let values = distances
                    .get_mut(*name)
                    .ok_or_else(|| format!("Unknown comparison category '{}'", name))?;
                for comp_id in comp_ids {
                    values.push(matrix.get(bucket_sample_id, comp_id)?);
                }
            }
        }

        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleRecord;

    fn record(id: &str, bucket: i64, time_point: i64, sample_type: &str) -> SampleRecord {
        SampleRecord {
            sample_id: id.to_string(),
            bucket,
            time_point,
            sample_type: sample_type.to_string(),
        }
    }

    /// Metadata with 5 post-roll rows for bucket 2 (time points 1..=5),
    /// 3 fecal rows (2 for bucket 2, 1 for bucket 5), one soil row, and a
    /// sentinel row that must never match.
    fn fixture() -> (MetadataTable, DistanceMatrix) {
        let records = vec![
            record("b2.t3", 2, 3, "Compost Post-Roll"),
            record("b2.t1", 2, 1, "Compost Post-Roll"),
            record("b2.t5", 2, 5, "Compost Post-Roll"),
            record("b2.t2", 2, 2, "Compost Post-Roll"),
            record("b2.t4", 2, 4, "Compost Post-Roll"),
            record("b2.pre", 2, 6, "Compost Pre-Roll"),
            record("fecal.b2.a", 2, -1, "Human Excrement"),
            record("fecal.b2.b", 2, -1, "Human Excrement"),
            record("fecal.b5", 5, -1, "Human Excrement"),
            record("soil.1", -1, -1, "Soil"),
            record("sentinel", -1, -1, "Compost Post-Roll"),
        ];
        let metadata = MetadataTable::new(records);

        let ids: Vec<String> = metadata
            .records
            .iter()
            .map(|r| r.sample_id.clone())
            .collect();
        let size = ids.len();
        // Cell (i, j) = |i - j| / 10 keeps values distinct and symmetric
        let values: Vec<Vec<f64>> = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| (i as f64 - j as f64).abs() / 10.0)
                    .collect()
            })
            .collect();
        let matrix = DistanceMatrix::new(ids, values).unwrap();

        (metadata, matrix)
    }

    fn request(n: usize) -> SelectionRequest {
        SelectionRequest {
            bucket_id: 2,
            n,
            roll_stage: RollStage::Post,
            from_beginning: false,
            own_fecal: false,
        }
    }

    #[test]
    fn test_latest_n_selection() {
        let (metadata, _) = fixture();
        let selector = DistanceSelector::default();

        let ids = selector.bucket_sample_ids(&metadata, &request(3));
        assert_eq!(ids, vec!["b2.t5", "b2.t4", "b2.t3"]);
    }

    #[test]
    fn test_earliest_n_selection() {
        let (metadata, _) = fixture();
        let selector = DistanceSelector::default();

        let mut req = request(2);
        req.from_beginning = true;
        let ids = selector.bucket_sample_ids(&metadata, &req);
        assert_eq!(ids, vec!["b2.t1", "b2.t2"]);
    }

    #[test]
    fn test_n_larger_than_available() {
        let (metadata, _) = fixture();
        let selector = DistanceSelector::default();

        let ids = selector.bucket_sample_ids(&metadata, &request(50));
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_ties_keep_row_order() {
        let records = vec![
            record("first", 1, 7, "Compost Post-Roll"),
            record("second", 1, 7, "Compost Post-Roll"),
            record("third", 1, 7, "Compost Post-Roll"),
        ];
        let metadata = MetadataTable::new(records);
        let selector = DistanceSelector::default();

        let req = SelectionRequest {
            bucket_id: 1,
            n: 3,
            roll_stage: RollStage::Post,
            from_beginning: false,
            own_fecal: false,
        };
        assert_eq!(
            selector.bucket_sample_ids(&metadata, &req),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_sentinel_bucket_never_matches() {
        let (metadata, _) = fixture();
        let selector = DistanceSelector::default();

        // The "sentinel" row has bucket -1 and type Compost Post-Roll; asking
        // for bucket -1 would only ever come from missing data, and the row
        // must not leak into real bucket queries.
        let ids = selector.bucket_sample_ids(&metadata, &request(10));
        assert!(ids.iter().all(|id| id != "sentinel"));
    }

    #[test]
    fn test_output_lengths_and_all_categories_present() {
        let (metadata, matrix) = fixture();
        let selector = DistanceSelector::default();

        let out = selector.select(&metadata, &matrix, &request(3)).unwrap();
        assert_eq!(
            out.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["bulking material", "fecal", "food compost", "soil"]
        );

        // 3 bucket samples × 3 fecal ids, × 1 soil id, × 0 for the rest
        assert_eq!(out["fecal"].len(), 9);
        assert_eq!(out["soil"].len(), 3);
        assert_eq!(out["food compost"].len(), 0);
        assert_eq!(out["bulking material"].len(), 0);
    }

    #[test]
    fn test_own_fecal_scope() {
        let (metadata, matrix) = fixture();
        let selector = DistanceSelector::default();

        let mut req = request(3);
        req.own_fecal = true;
        let out = selector.select(&metadata, &matrix, &req).unwrap();

        // Bucket 5's fecal sample is excluded: 3 × 2 instead of 3 × 3
        assert_eq!(out["fecal"].len(), 6);
        // Non-scoped categories are unaffected
        assert_eq!(out["soil"].len(), 3);
    }

    #[test]
    fn test_lookup_order_is_bucket_sample_major() {
        let (metadata, matrix) = fixture();
        let selector = DistanceSelector::default();

        let out = selector.select(&metadata, &matrix, &request(2)).unwrap();

        // Selected bucket samples: b2.t5 (row 2), b2.t4 (row 4); fecal ids in
        // row order: fecal.b2.a (6), fecal.b2.b (7), fecal.b5 (8).
        let expected = vec![
            (2 - 6i64).abs() as f64 / 10.0,
            (2 - 7i64).abs() as f64 / 10.0,
            (2 - 8i64).abs() as f64 / 10.0,
            (4 - 6i64).abs() as f64 / 10.0,
            (4 - 7i64).abs() as f64 / 10.0,
            (4 - 8i64).abs() as f64 / 10.0,
        ];
        assert_eq!(out["fecal"], expected);
    }

    #[test]
    fn test_determinism() {
        let (metadata, matrix) = fixture();
        let selector = DistanceSelector::default();

        let a = selector.select(&metadata, &matrix, &request(3)).unwrap();
        let b = selector.select(&metadata, &matrix, &request(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_timepoints_yields_empty_lists() {
        let (metadata, matrix) = fixture();
        let selector = DistanceSelector::default();

        let out = selector.select(&metadata, &matrix, &request(0)).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.values().all(|v| v.is_empty()));
    }

    #[test]
    fn test_pre_roll_stage() {
        let (metadata, matrix) = fixture();
        let selector = DistanceSelector::default();

        let mut req = request(3);
        req.roll_stage = RollStage::Pre;
        let out = selector.select(&metadata, &matrix, &req).unwrap();

        // One pre-roll sample for bucket 2
        assert_eq!(out["fecal"].len(), 3);
        assert_eq!(out["soil"].len(), 1);
    }

    #[test]
    fn test_missing_matrix_id_is_propagated() {
        let (metadata, _) = fixture();
        // Matrix that lacks most of the metadata ids; with an unfiltered table
        // the lookup must fail loudly instead of skipping pairs.
        let small = DistanceMatrix::new(
            vec!["b2.t5".to_string(), "b2.t4".to_string()],
            vec![vec![0.0, 0.1], vec![0.1, 0.0]],
        )
        .unwrap();

        let selector = DistanceSelector::default();
        let err = selector.select(&metadata, &small, &request(2)).unwrap_err();
        assert!(err.contains("metadata/matrix mismatch"));
    }
}
