// batch.rs - Batch driver running selections for many buckets

use crate::core::selector::{DistanceSelector, SelectionRequest};
use crate::core::vocabulary::RollStage;
use crate::data::{DistanceMatrix, MetadataTable};
use crate::output;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-run selection settings shared by every bucket
#[derive(Debug, Clone, Copy)]
pub struct BatchRequest {
    pub n: usize,
    pub roll_stage: RollStage,
    pub from_beginning: bool,
    pub own_fecal: bool,
}

impl BatchRequest {
    fn for_bucket(&self, bucket_id: i64) -> SelectionRequest {
        SelectionRequest {
            bucket_id,
            n: self.n,
            roll_stage: self.roll_stage,
            from_beginning: self.from_beginning,
            own_fecal: self.own_fecal,
        }
    }
}

/// What one bucket's selection produced
#[derive(Debug, Clone, Serialize)]
pub struct BucketReport {
    pub bucket_id: i64,
    pub output_file: PathBuf,
    pub bucket_samples: usize,
    pub category_counts: BTreeMap<String, usize>,
}

/// Run selections for every bucket id and write one JSON artifact per bucket.
///
/// Buckets are independent and the inputs are read-only, so the selections run
/// in parallel. Any bucket failure fails the whole run.
pub fn run_batch(
    selector: &DistanceSelector,
    metadata: &MetadataTable,
    matrix: &DistanceMatrix,
    bucket_ids: &[i64],
    request: &BatchRequest,
    output_dir: &Path,
) -> Result<Vec<BucketReport>, String> {
    bucket_ids
        .par_iter()
        .map(|&bucket_id| {
            let selection = request.for_bucket(bucket_id);
            let distances = selector.select(metadata, matrix, &selection)?;

            let output_file = output_dir.join(format!("distances-bucket-{}.json", bucket_id));
            output::write_distances(&output_file, &distances)?;

            let bucket_samples = selector.bucket_sample_ids(metadata, &selection).len();
            let category_counts = distances
                .iter()
                .map(|(name, values)| (name.clone(), values.len()))
                .collect();

            Ok(BucketReport {
                bucket_id,
                output_file,
                bucket_samples,
                category_counts,
            })
        })
        .collect()
}
