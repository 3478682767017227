use anyhow::{Context, Result};
use clap::Parser;
use data_analyzer::{AnalysisConfig, AnalysisError, Analyzer};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "data-analyzer")]
#[command(about = "Statistics, outliers, plots and recommendations for one CSV file")]
#[command(version)]
struct Args {
    /// Path to the CSV file to analyze
    csv_file_path: Option<PathBuf>,

    /// Directory for data_analysis_report.json and data_analysis_plots.png
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip the chart grid even when enough numeric columns exist
    #[arg(long)]
    no_plots: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let Some(file_path) = args.csv_file_path else {
        println!("Usage: data-analyzer <csv_file_path>");
        return Ok(());
    };

    let config = AnalysisConfig::default()
        .with_output_dir(&args.output_dir)
        .with_plots(!args.no_plots);
    let analyzer = Analyzer::new(config);

    let (dataset, classification) = match analyzer.load(&file_path) {
        Ok(loaded) => loaded,
        Err(AnalysisError::Load(msg)) => {
            error!("{}", msg);
            println!("Error loading data: {}", msg);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let summary = analyzer
        .analyze(&dataset, &classification)
        .with_context(|| format!("Analysis of {} failed", file_path.display()))?;

    println!("\n{}", summary);
    Ok(())
}
