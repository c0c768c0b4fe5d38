// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::cli::config::Config;
use crate::core::vocabulary::{ColumnRoles, RollStage, Vocabulary};
use regex::Regex;

#[derive(Debug)]
pub struct ValidationResult {
    pub roll_stage: RollStage,
    pub bucket_ids: Vec<i64>,
    pub separator: char,
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
    pub columns: ColumnRoles,
    pub vocabulary: Vocabulary,
}

/// Expand a bucket list/range expression like "1-16" or "1,2,5-8".
///
/// Duplicates are removed, first occurrence wins, order preserved.
pub fn parse_bucket_list(expr: &str) -> Result<Vec<i64>, String> {
    let mut bucket_ids = Vec::new();
    for part in expr.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start: i64 = start
                .trim()
                .parse()
                .map_err(|_| format!("Invalid bucket range '{}'", part))?;
            let end: i64 = end
                .trim()
                .parse()
                .map_err(|_| format!("Invalid bucket range '{}'", part))?;
            if end < start {
                return Err(format!("Bucket range '{}' is reversed", part));
            }
            for id in start..=end {
                if !bucket_ids.contains(&id) {
                    bucket_ids.push(id);
                }
            }
        } else {
            let id: i64 = part
                .parse()
                .map_err(|_| format!("Invalid bucket id '{}'", part))?;
            if !bucket_ids.contains(&id) {
                bucket_ids.push(id);
            }
        }
    }

    if bucket_ids.is_empty() {
        return Err(format!("Bucket expression '{}' selects no buckets", expr));
    }
    Ok(bucket_ids)
}

fn parse_separator(sep: &str) -> Result<char, String> {
    match sep {
        "tab" | "\\t" | "\t" => Ok('\t'),
        "comma" => Ok(','),
        s if s.chars().count() == 1 => Ok(s.chars().next().unwrap()),
        other => Err(format!(
            "Invalid separator '{}'. Use tab, comma, or a single character",
            other
        )),
    }
}

/// Validate all command line arguments
pub fn validate_args(args: &Args, config: Option<&Config>) -> Result<ValidationResult, String> {
    // Roll stage must be resolvable before any selection runs
    let roll_stage: RollStage = args.roll_stage.parse()?;

    let buckets_expr = args
        .buckets
        .as_ref()
        .ok_or("--buckets is required (e.g. --buckets 1-16)")?;
    let bucket_ids = parse_bucket_list(buckets_expr)?;

    let separator = parse_separator(&args.sep)?;

    let include_regex = args
        .include_samples
        .as_ref()
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid --include-samples regex: {}", e)))
        .transpose()?;
    let exclude_regex = args
        .exclude_samples
        .as_ref()
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid --exclude-samples regex: {}", e)))
        .transpose()?;

    let columns = config
        .and_then(|c| c.columns.as_ref())
        .map(|c| c.resolve())
        .unwrap_or_default();
    let vocabulary = config
        .and_then(|c| c.vocabulary.as_ref())
        .map(|v| v.resolve())
        .unwrap_or_default();

    if vocabulary.categories.is_empty() {
        return Err("Vocabulary must define at least one comparison category".to_string());
    }

    Ok(ValidationResult {
        roll_stage,
        bucket_ids,
        separator,
        include_regex,
        exclude_regex,
        columns,
        vocabulary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_list_parsing() {
        assert_eq!(parse_bucket_list("1-4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(parse_bucket_list("7").unwrap(), vec![7]);
        assert_eq!(parse_bucket_list("1,3,5-7").unwrap(), vec![1, 3, 5, 6, 7]);
        assert_eq!(parse_bucket_list("2, 2, 1-3").unwrap(), vec![2, 1, 3]);

        assert!(parse_bucket_list("").is_err());
        assert!(parse_bucket_list("abc").is_err());
        assert!(parse_bucket_list("5-2").is_err());
    }

    #[test]
    fn test_separator_parsing() {
        assert_eq!(parse_separator("tab").unwrap(), '\t');
        assert_eq!(parse_separator("comma").unwrap(), ',');
        assert_eq!(parse_separator(";").unwrap(), ';');
        assert!(parse_separator("ab").is_err());
    }

    fn args_with(buckets: &str, roll_stage: &str) -> Args {
        Args {
            metadata: Some("md.tsv".to_string()),
            matrix: Some("dm.tsv".to_string()),
            output_dir: "distances".to_string(),
            buckets: Some(buckets.to_string()),
            timepoints: 3,
            roll_stage: roll_stage.to_string(),
            from_beginning: false,
            own_fecal: false,
            sep: "tab".to_string(),
            include_samples: None,
            exclude_samples: None,
            threads: None,
            config: None,
            generate_config: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_invalid_roll_stage_rejected() {
        let args = args_with("1-4", "mid");
        let err = validate_args(&args, None).unwrap_err();
        assert!(err.contains("Invalid roll stage 'mid'"));
    }

    #[test]
    fn test_valid_args() {
        let args = args_with("1-16", "pre");
        let result = validate_args(&args, None).unwrap();
        assert_eq!(result.roll_stage, RollStage::Pre);
        assert_eq!(result.bucket_ids.len(), 16);
        assert_eq!(result.separator, '\t');
        assert_eq!(result.vocabulary.categories.len(), 4);
    }
}
