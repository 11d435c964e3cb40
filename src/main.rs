//! Catalog Lens - Netflix catalog analysis from the command line
//!
//! Guides the operator through preparation, cleaning, exploration and
//! visualization of a catalog CSV.

use anyhow::{Context, Result};
use catalog_lens::logging::init_logging;
use catalog_lens::pipeline::{default_output_dir, AutoConfirm, Confirm, ConsoleConfirm, PathPrompt};
use catalog_lens::report::banner;
use catalog_lens::{AnalysisConfig, ChartMode, Pipeline, RunOptions};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "catalog_lens")]
#[command(about = "Exploratory analysis and bar charts for a Netflix catalog CSV")]
#[command(version)]
struct Cli {
    /// CSV file, or folder containing netflix_data.csv (prompted when omitted)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Folder for copies, report and charts (defaults to the input folder)
    #[arg(long)]
    output: Option<PathBuf>,
    /// JSON file overriding sentinels, rating sets, thresholds and file names
    #[arg(long)]
    config: Option<PathBuf>,
    /// Answer yes to every save prompt and save all charts without the menu
    #[arg(long)]
    yes: bool,
    /// Skip the visualization stage
    #[arg(long)]
    no_charts: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    println!("\n{}", banner("NETFLIX DATA ANALYSIS TOOL"));
    println!("\nThis tool will guide you through:");
    println!("- Data preparation and cleaning");
    println!("- Exploratory analysis");
    println!("- Interactive visualizations");

    let mut prompt = PathPrompt::stdio();
    let input = match cli.input {
        Some(path) => path,
        None if cli.yes => PathBuf::from("."),
        None => prompt
            .ask("Enter path to input folder", Path::new("."))
            .context("Failed to read input folder")?,
    };
    let output_dir = match cli.output {
        Some(path) => path,
        None if cli.yes => default_output_dir(&input),
        None => prompt
            .ask("Enter path for output folder", &default_output_dir(&input))
            .context("Failed to read output folder")?,
    };
    let charts = if cli.no_charts {
        ChartMode::Skip
    } else if cli.yes {
        ChartMode::SaveAll
    } else {
        ChartMode::Interactive
    };

    info!(input = %input.display(), output = %output_dir.display(), ?charts, "starting analysis");

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(ConsoleConfirm::stdio())
    };
    let options = RunOptions {
        input,
        output_dir: output_dir.clone(),
        charts,
    };

    match Pipeline::new(config, options, confirm.as_mut()).run() {
        Ok(summary) => {
            println!("\n{}", banner("ANALYSIS COMPLETE"));
            println!("\nSuccessfully completed all analysis steps!");
            println!("Records analyzed: {}", summary.records);
            for path in &summary.written {
                println!("  - {}", path.display());
            }
            println!("\nOutput files saved to: {}", output_dir.display());
            Ok(())
        }
        Err(e) => {
            print!("\n{}", e.diagnostic());
            Err(e.into())
        }
    }
}
