// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// compodist - Distance comparison selector for composting-bucket samples
pub struct Args {
    /// path to the sample metadata table (.tsv or .csv)
    #[argh(option)]
    pub metadata: Option<String>,

    /// path to the precomputed sample-to-sample distance matrix (.tsv)
    #[argh(option)]
    pub matrix: Option<String>,

    /// directory for per-bucket JSON artifacts (default: distances)
    #[argh(option, default = "String::from(\"distances\")")]
    pub output_dir: String,

    /// bucket ids to process, as a list/range expression (e.g. "1-16" or "1,2,5")
    #[argh(option)]
    pub buckets: Option<String>,

    /// number of time points to select per bucket (default: 3)
    #[argh(option, default = "3")]
    pub timepoints: usize,

    /// composting stage of bucket samples: pre, post (default: post)
    #[argh(option, default = "String::from(\"post\")")]
    pub roll_stage: String,

    /// select the earliest time points instead of the latest
    #[argh(switch)]
    pub from_beginning: bool,

    /// compare fecal samples only against the bucket's own fecal samples
    #[argh(switch)]
    pub own_fecal: bool,

    /// metadata field separator: tab, comma, or a single character (default: tab)
    #[argh(option, default = "String::from(\"tab\")")]
    pub sep: String,

    /// include only samples matching regex pattern
    #[argh(option)]
    pub include_samples: Option<String>,

    /// exclude samples matching regex pattern
    #[argh(option)]
    pub exclude_samples: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// print a sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// validate inputs without writing any output
    #[argh(switch)]
    pub dry_run: bool,
}
