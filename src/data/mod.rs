// mod.rs - Data structures module

pub mod loaders;
pub mod matrix;
pub mod metadata;

// Re-export main types for convenience
pub use matrix::DistanceMatrix;
pub use metadata::{MetadataTable, SampleRecord, MISSING_VALUE};
