// config.rs - Configuration file support

use crate::core::vocabulary::{ColumnRoles, ComparisonCategory, Vocabulary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Metadata column-name overrides; any omitted role keeps its default
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ColumnsConfig {
    pub sample_id: Option<String>,
    pub bucket: Option<String>,
    pub sample_type: Option<String>,
    pub time_point: Option<String>,
}

impl ColumnsConfig {
    pub fn resolve(&self) -> ColumnRoles {
        let defaults = ColumnRoles::default();
        ColumnRoles {
            sample_id: self.sample_id.clone().unwrap_or(defaults.sample_id),
            bucket: self.bucket.clone().unwrap_or(defaults.bucket),
            sample_type: self.sample_type.clone().unwrap_or(defaults.sample_type),
            time_point: self.time_point.clone().unwrap_or(defaults.time_point),
        }
    }
}

/// Label-vocabulary overrides; must stay in sync with the upstream
/// metadata labeling conventions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VocabularyConfig {
    pub post_roll_label: Option<String>,
    pub pre_roll_label: Option<String>,
    pub categories: Option<Vec<ComparisonCategory>>,
}

impl VocabularyConfig {
    pub fn resolve(&self) -> Vocabulary {
        let mut vocab = Vocabulary::default();
        if let Some(label) = &self.post_roll_label {
            vocab.post_roll_label = label.clone();
        }
        if let Some(label) = &self.pre_roll_label {
            vocab.pre_roll_label = label.clone();
        }
        if let Some(categories) = &self.categories {
            vocab.categories = categories.clone();
        }
        vocab
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub metadata: Option<String>,
    pub matrix: Option<String>,
    pub output_dir: Option<String>,

    // Selection settings
    pub buckets: Option<String>,
    pub timepoints: Option<usize>,
    pub roll_stage: Option<String>,
    pub from_beginning: Option<bool>,
    pub own_fecal: Option<bool>,

    // Metadata parsing
    pub sep: Option<String>,
    pub include_samples: Option<String>,
    pub exclude_samples: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,

    // Label/column overrides
    pub columns: Option<ColumnsConfig>,
    pub vocabulary: Option<VocabularyConfig>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# compodist.toml - Configuration file for compodist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Path to the sample metadata table (.tsv or .csv)
metadata = "final-analysis-metadata.tsv"

# Path to the precomputed sample-to-sample distance matrix (.tsv)
matrix = "distance-matrix.tsv"

# Directory for per-bucket JSON artifacts
output_dir = "figures/data"

# =============================================================================
# SELECTION SETTINGS
# =============================================================================

# Bucket ids to process, as a list/range expression
buckets = "1-16"

# Number of time points to select per bucket
timepoints = 3

# Composting stage of bucket samples: pre, post
roll_stage = "post"

# Select the earliest time points instead of the latest
from_beginning = false

# Compare fecal samples only against the bucket's own fecal samples
own_fecal = false

# =============================================================================
# METADATA PARSING
# =============================================================================

# Metadata field separator: tab, comma, or a single character
sep = "tab"

# Include only samples matching regex pattern
# include_samples = "bucket.*"

# Exclude samples matching regex pattern
# exclude_samples = "blank.*"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# COLUMN ROLES (omitted roles keep their defaults)
# =============================================================================

# [columns]
# sample_id = "sample-id"
# bucket = "Bucket"
# sample_type = "SampleType"
# time_point = "Composting Time Point"

# =============================================================================
# LABEL VOCABULARY (must match the metadata labeling conventions)
# =============================================================================

# [vocabulary]
# post_roll_label = "Compost Post-Roll"
# pre_roll_label = "Compost Pre-Roll"
# categories = [
#     { name = "fecal", label = "Human Excrement", bucket_scoped = true },
#     { name = "soil", label = "Soil" },
#     { name = "food compost", label = "Food Compost" },
#     { name = "bulking material", label = "Bulking Material" },
# ]
"#
        .to_string()
    }
}
