use std::time::Instant;

use clap::Parser;
use log::info;
use meshq_core::pipeline::run_strategy;
use meshq_core::{Point3, Strategy, UniformQuantizer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sweep quantization bin counts over a random point cloud", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 100_000)]
    points: usize,

    #[arg(short, long, default_value_t = 0x5EED)]
    seed: u64,

    /// Bin counts to sweep
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![4u32, 16, 64, 256, 1024, 4096, 65536])]
    bins: Vec<u32>,

    /// Extent of the cloud along each axis
    #[arg(short, long, default_value_t = 10.0, value_parser = positive_extent)]
    extent: f64,
}

fn positive_extent(s: &str) -> Result<f64, String> {
    let extent: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if extent.is_finite() && extent > 0.0 {
        Ok(extent)
    } else {
        Err(format!("extent must be a positive finite number, got {}", s))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Anisotropic cloud so the two strategies disagree per axis.
    let mut rng = StdRng::seed_from_u64(args.seed);
    let cloud: Vec<Point3> = (0..args.points)
        .map(|_| [
            rng.gen_range(-args.extent..args.extent),
            rng.gen_range(0.0..args.extent * 0.25),
            rng.gen_range(-args.extent * 4.0..args.extent),
        ])
        .collect();
    info!("Generated {} points (seed {:#x})", cloud.len(), args.seed);

    println!("--- MESHQ BIN SWEEP ---");
    println!("Points:   {}", args.points);
    println!("Extent:   {}", args.extent);
    println!("Bins:     {:?}", args.bins);
    println!("-----------------------\n");

    println!("{:>8} {:<12} {:>12} {:>12} {:>12} {:>12} {:>10}", "bins", "strategy", "mse x", "mse y", "mse z", "mae mean", "Mpts/s");
    for &bins in &args.bins {
        let quantizer = UniformQuantizer::new(bins)?;
        for strategy in Strategy::ALL {
            let start = Instant::now();
            let outcome = run_strategy(&cloud, strategy, &quantizer)?;
            let elapsed = start.elapsed();

            let mse = outcome.errors.mse;
            let mae = outcome.errors.mae;
            let throughput = cloud.len() as f64 / elapsed.as_secs_f64().max(1e-9) / 1e6;
            println!(
                "{:>8} {:<12} {:>12.3e} {:>12.3e} {:>12.3e} {:>12.3e} {:>10.2}",
                bins,
                strategy.label(),
                mse[0],
                mse[1],
                mse[2],
                (mae[0] + mae[1] + mae[2]) / 3.0,
                throughput
            );
        }
    }

    Ok(())
}
