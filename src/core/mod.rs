// mod.rs - Core selection logic module

pub mod batch;
pub mod selector;
pub mod vocabulary;

// Re-export main types for convenience
pub use batch::{run_batch, BatchRequest, BucketReport};
pub use selector::{CategoryDistances, DistanceSelector, SelectionRequest};
pub use vocabulary::{ColumnRoles, ComparisonCategory, RollStage, Vocabulary};
