// vocabulary.rs - Versioned sample-type vocabulary and column roles

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Composting stage of a bucket sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollStage {
    Pre,
    Post,
}

impl FromStr for RollStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "pre" => Ok(RollStage::Pre),
            "post" => Ok(RollStage::Post),
            other => Err(format!(
                "Invalid roll stage '{}'. Use one of: pre, post",
                other
            )),
        }
    }
}

impl RollStage {
    pub fn description(&self) -> &'static str {
        match self {
            RollStage::Pre => "pre-roll bucket compost",
            RollStage::Post => "post-roll bucket compost",
        }
    }
}

/// One external reference group that bucket samples are compared against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonCategory {
    /// Key used in the output mapping (e.g. "fecal")
    pub name: String,
    /// SampleType label carried by matching metadata rows
    pub label: String,
    /// Whether the own-bucket restriction applies to this category
    #[serde(default)]
    pub bucket_scoped: bool,
}

impl ComparisonCategory {
    pub fn new(name: &str, label: &str, bucket_scoped: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            bucket_scoped,
        }
    }
}

/// The active set of comparison categories plus the bucket-stage labels.
///
/// Labels must stay in sync with the upstream metadata labeling conventions;
/// overrides come from the configuration file, not from code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub categories: Vec<ComparisonCategory>,
    pub post_roll_label: String,
    pub pre_roll_label: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            categories: vec![
                ComparisonCategory::new("fecal", "Human Excrement", true),
                ComparisonCategory::new("soil", "Soil", false),
                ComparisonCategory::new("food compost", "Food Compost", false),
                ComparisonCategory::new("bulking material", "Bulking Material", false),
            ],
            post_roll_label: "Compost Post-Roll".to_string(),
            pre_roll_label: "Compost Pre-Roll".to_string(),
        }
    }
}

impl Vocabulary {
    /// SampleType label identifying bucket samples at the given stage
    pub fn bucket_label(&self, stage: RollStage) -> &str {
        match stage {
            RollStage::Post => &self.post_roll_label,
            RollStage::Pre => &self.pre_roll_label,
        }
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Metadata column roles. Names are configurable as long as the semantic
/// roles are preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub sample_id: String,
    pub bucket: String,
    pub sample_type: String,
    pub time_point: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            sample_id: "sample-id".to_string(),
            bucket: "Bucket".to_string(),
            sample_type: "SampleType".to_string(),
            time_point: "Composting Time Point".to_string(),
        }
    }
}
