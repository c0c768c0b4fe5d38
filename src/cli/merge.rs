// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: &Config) -> Self {
        // Input/Output
        if self.metadata.is_none() {
            self.metadata = config.metadata.clone();
        }
        if self.matrix.is_none() {
            self.matrix = config.matrix.clone();
        }
        if self.output_dir == "distances" {
            if let Some(output_dir) = &config.output_dir {
                self.output_dir = output_dir.clone();
            }
        }

        // Selection settings (only override defaults, not explicit CLI values)
        if self.buckets.is_none() {
            self.buckets = config.buckets.clone();
        }
        if self.timepoints == 3 {
            if let Some(timepoints) = config.timepoints {
                self.timepoints = timepoints;
            }
        }
        if self.roll_stage == "post" {
            if let Some(roll_stage) = &config.roll_stage {
                self.roll_stage = roll_stage.clone();
            }
        }
        if !self.from_beginning {
            self.from_beginning = config.from_beginning.unwrap_or(false);
        }
        if !self.own_fecal {
            self.own_fecal = config.own_fecal.unwrap_or(false);
        }

        // Metadata parsing
        if self.sep == "tab" {
            if let Some(sep) = &config.sep {
                self.sep = sep.clone();
            }
        }
        if self.include_samples.is_none() {
            self.include_samples = config.include_samples.clone();
        }
        if self.exclude_samples.is_none() {
            self.exclude_samples = config.exclude_samples.clone();
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags
        if !self.dry_run {
            self.dry_run = config.dry_run.unwrap_or(false);
        }

        self
    }
}
