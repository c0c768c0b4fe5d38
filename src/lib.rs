// lib.rs - compodist library root

//! # compodist - Distance comparison selector for composting-bucket samples
//!
//! This library selects pairwise distance comparisons between composting-bucket
//! samples and reference sample categories (fecal, soil, food compost, bulking
//! material) from a microbiome study. It consumes a precomputed sample-to-sample
//! distance matrix plus a sample metadata table, and emits one JSON artifact of
//! grouped distances per bucket for downstream visualization.
//!
//! ## Features
//!
//! - **Time-point selection**: latest-n or earliest-n bucket samples, pre- or
//!   post-roll, with stable tie-breaking
//! - **Parameterized vocabulary**: comparison categories and metadata labels
//!   are configuration, not code
//! - **Own-fecal scoping**: fecal comparisons optionally restricted to the
//!   bucket's own samples
//! - **Parallel batch driver**: independent buckets run concurrently over the
//!   shared read-only inputs
//! - **Drop diagnostics**: metadata rows absent from the matrix are counted
//!   and reported, never silently lost
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use compodist::prelude::*;
//! use std::path::Path;
//!
//! let columns = ColumnRoles::default();
//! let metadata = MetadataTable::from_file(Path::new("metadata.tsv"), '\t', &columns)?;
//! let matrix = DistanceMatrix::from_file(Path::new("distance-matrix.tsv"))?;
//! let (metadata, dropped) = metadata.restrict_to_matrix(&matrix);
//! assert_eq!(dropped, 0);
//!
//! let selector = DistanceSelector::default();
//! let distances = selector.select(
//!     &metadata,
//!     &matrix,
//!     &SelectionRequest {
//!         bucket_id: 2,
//!         n: 3,
//!         roll_stage: RollStage::Post,
//!         from_beginning: false,
//!         own_fecal: false,
//!     },
//! )?;
//! println!("fecal comparisons: {}", distances["fecal"].len());
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{parse_bucket_list, validate_args, Args, Config, ValidationResult};
    pub use crate::core::{run_batch, BatchRequest, BucketReport};
    pub use crate::core::{CategoryDistances, DistanceSelector, SelectionRequest};
    pub use crate::core::{ColumnRoles, ComparisonCategory, RollStage, Vocabulary};
    pub use crate::data::{DistanceMatrix, MetadataTable, SampleRecord};
    pub use crate::output::{write_distances, write_run_summary, RunSummary};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, Config, ValidationResult};
pub use crate::core::{DistanceSelector, RollStage, SelectionRequest, Vocabulary};
pub use data::{DistanceMatrix, MetadataTable, SampleRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "compodist v{} - Distance comparison selector for composting buckets",
        VERSION
    )
}
