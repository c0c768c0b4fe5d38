// main.rs - CLI entry point

use compodist::prelude::*;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    let config = match args.config.clone() {
        Some(config_path) => {
            let config = Config::from_file(&config_path)?;
            args = args.merge_with_config(&config);
            Some(config)
        }
        None => None,
    };

    let metadata_path = args.metadata.as_ref().ok_or("--metadata is required")?;
    let matrix_path = args.matrix.as_ref().ok_or("--matrix is required")?;

    println!("🚀 compodist v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    // Validate all arguments
    let validation_result = validate_args(&args, config.as_ref())?;

    println!(
        "🎯 Selection: {} time point(s) per bucket, {}, {}",
        args.timepoints,
        validation_result.roll_stage.description(),
        if args.from_beginning {
            "earliest first"
        } else {
            "latest first"
        }
    );
    if args.own_fecal {
        println!("🪣 Fecal comparisons restricted to each bucket's own samples");
    }
    println!(
        "🗂️  Comparison categories: {}",
        validation_result.vocabulary.category_names().join(", ")
    );

    let total_start = Instant::now();

    // Load inputs
    println!("📊 Loading metadata: {}", metadata_path);
    let metadata = MetadataTable::from_file(
        Path::new(metadata_path),
        validation_result.separator,
        &validation_result.columns,
    )?;
    let metadata = metadata.apply_sample_filters(
        validation_result.include_regex.as_ref(),
        validation_result.exclude_regex.as_ref(),
    );

    println!("📊 Loading distance matrix: {}", matrix_path);
    let matrix = DistanceMatrix::from_file(Path::new(matrix_path))?;

    // Pre-filter metadata to the matrix index before any selection
    let (metadata, dropped) = metadata.restrict_to_matrix(&matrix);
    if dropped > 0 {
        println!(
            "⚠️  {} metadata row(s) not present in the distance matrix were dropped",
            dropped
        );
    }
    if metadata.is_empty() {
        return Err("No metadata rows remain after matrix filtering".to_string());
    }

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        println!(
            "📊 Inputs: {} metadata samples, {} × {} distance matrix, {} bucket(s)",
            metadata.len(),
            matrix.len(),
            matrix.len(),
            validation_result.bucket_ids.len()
        );
        return Ok(());
    }

    // Run the batch over all requested buckets
    let selector = DistanceSelector::new(validation_result.vocabulary.clone());
    let request = BatchRequest {
        n: args.timepoints,
        roll_stage: validation_result.roll_stage,
        from_beginning: args.from_beginning,
        own_fecal: args.own_fecal,
    };
    let output_dir = Path::new(&args.output_dir);

    println!(
        "\n🔄 Selecting distances for {} bucket(s)...",
        validation_result.bucket_ids.len()
    );
    let reports = run_batch(
        &selector,
        &metadata,
        &matrix,
        &validation_result.bucket_ids,
        &request,
        output_dir,
    )?;

    for report in &reports {
        let total: usize = report.category_counts.values().sum();
        println!(
            "  🪣 Bucket {}: {} sample(s), {} distance value(s) → {}",
            report.bucket_id,
            report.bucket_samples,
            total,
            report.output_file.display()
        );
    }

    // Write the run summary sidecar
    let summary = RunSummary::new(
        &command_line,
        metadata.len(),
        dropped,
        matrix.len(),
        reports,
    );
    write_run_summary(output_dir, &summary)?;

    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === COMPODIST COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!("📁 Artifacts written to: {}", output_dir.display());

    Ok(())
}
