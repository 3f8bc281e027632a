use itertools::Itertools;
use reflow::{PipelineBuilder, PipelineError};
use serde_json::{Value, from_str};
use std::env;
use std::fs;

/// A simple CLI to render a paginated lab report from a data file.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("A tool to render paginated lab reports from structured report data.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/report.json> <path/to/output.html> [assets-dir]",
            args[0]
        );
        eprintln!();
        eprintln!("When an assets directory is given, signature/background/barcode");
        eprintln!("references resolve against it; otherwise only data: URIs resolve.");
        std::process::exit(1);
    }

    let data_path = &args[1];
    let output_path = &args[2];

    println!("Loading report data from {}", data_path);
    let data_json_str = fs::read_to_string(data_path)?;
    let data: Value = from_str(&data_json_str)?;

    let mut builder = PipelineBuilder::new();
    if let Some(assets_dir) = args.get(3) {
        println!("Resolving assets from {}", assets_dir);
        builder = builder.with_asset_dir(assets_dir);
    }
    let pipeline = builder.build();

    println!("Rendering report to {}...", output_path);
    let diagnostics = pipeline.render_to_file(&data, output_path)?;

    if !diagnostics.is_empty() {
        println!("Completed with {} warnings:", diagnostics.len());
        println!("  {}", diagnostics.iter().join("\n  "));
    }
    println!("Successfully generated {}", output_path);
    Ok(())
}
