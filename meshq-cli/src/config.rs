use std::path::PathBuf;

use clap::Parser;
use meshq_core::DEFAULT_BINS;

/// Normalize, quantize and reconstruct every mesh in a directory, then report
/// per-axis reconstruction error for min-max and unit-sphere normalization.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory containing the meshes to process
    pub input_dir: PathBuf,

    /// Where artifacts and summary.json are written [default: <INPUT_DIR>/outputs]
    pub output_dir: Option<PathBuf>,

    /// Quantization bins per axis
    #[arg(short, long, default_value_t = DEFAULT_BINS, value_parser = clap::value_parser!(u32).range(2..))]
    pub bins: u32,

    /// Worker threads [default: number of CPUs]
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Skip SVG chart rendering
    #[arg(long)]
    pub no_plots: bool,

    /// Mesh file extension to pick up from the input directory
    #[arg(short, long, default_value = "obj")]
    pub extension: String,
}

impl Args {
    /// Parses the command line. Usage errors exit with status 1.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => {
                let _ = e.print();
                std::process::exit(if e.use_stderr() { 1 } else { 0 });
            }
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| self.input_dir.join("outputs"))
    }

    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["meshq", "meshes"]).unwrap();
        assert_eq!(args.bins, 1024);
        assert_eq!(args.output_dir(), PathBuf::from("meshes/outputs"));
        assert_eq!(args.extension, "obj");
        assert!(!args.no_plots);
        assert!(args.jobs() >= 1);
    }

    #[test]
    fn explicit_values() {
        let args = Args::try_parse_from(["meshq", "in", "out", "-b", "256", "-j", "0", "--no-plots"]).unwrap();
        assert_eq!(args.output_dir(), PathBuf::from("out"));
        assert_eq!(args.bins, 256);
        assert_eq!(args.jobs(), 1);
        assert!(args.no_plots);
    }

    #[test]
    fn missing_input_dir_is_a_usage_error() {
        let err = Args::try_parse_from(["meshq"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn rejects_single_bin() {
        assert!(Args::try_parse_from(["meshq", "in", "--bins", "1"]).is_err());
    }
}
