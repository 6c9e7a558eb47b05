use anyhow::Result;
use log::info;

use meshq_cli::{Args, BatchConfig, BatchRunner};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse_or_exit();

    let config = BatchConfig::from(&args);
    info!("Starting meshq batch over {}...", config.input_dir.display());

    let runner = BatchRunner::new(config.clone())?;
    let report = runner.run()?;

    println!("\nProcessing complete: {} mesh(es) processed.", report.results.len());
    if !report.skipped.is_empty() {
        println!("Skipped (no vertices): {}", report.skipped.join(", "));
    }
    for (file, reason) in &report.failed {
        println!("Failed: {} ({})", file, reason);
    }
    println!("Outputs saved to: {}", config.output_dir.display());
    println!("Summary file: {}", report.summary_path.display());
    Ok(())
}
