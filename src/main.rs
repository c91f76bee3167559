//! # chatframe CLI
//!
//! Command-line interface for the chatframe library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatframe::ChatframeError;
use chatframe::cli::Args;
use chatframe::config::TransformConfig;
use chatframe::output::write_dataset;
use chatframe::transform::ExportTransformer;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatframeError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Print header
    println!("📦 chatframe v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", args.out_dir);
    println!("📄 Format:  {}", args.format);
    if args.fix_encoding {
        println!("🔧 Repair:  Mojibake fix enabled");
    }
    println!();

    // Step 1: Transform the export into tables
    let config = TransformConfig::new().with_fix_encoding(args.fix_encoding);
    let transformer = ExportTransformer::with_config(config);

    println!("⏳ Transforming export...");
    let transform_start = Instant::now();
    let dataset = transformer.transform(Path::new(&args.input))?;
    let transform_time = transform_start.elapsed();
    println!(
        "   {} content rows, {} participants, {} reactions ({:.2}s)",
        dataset.messages.len(),
        dataset.participants.len(),
        dataset.reactions.len(),
        transform_time.as_secs_f64()
    );

    // Step 2: Write the tables in the selected format
    println!("💾 Writing {} tables...", args.format);
    let write_start = Instant::now();
    let written = write_dataset(&dataset, Path::new(&args.out_dir), args.format)?;
    let write_time = write_start.elapsed();
    println!("   Written in {:.2}s", write_time.as_secs_f64());

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Tables saved:");
    for path in &written {
        println!("   {}", path.display());
    }

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let rows = dataset.messages.len() + dataset.reactions.len();
    let rows_per_sec = rows as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} rows/sec", rows_per_sec);

    Ok(())
}
