use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use meshq_core::{analyze_mesh, ArtifactPaths, MeshAnalysis, MeshResult, Point3, UniformQuantizer};
use meshq_io::{load_obj_vertices, render_error_bars, render_scatter_comparison, write_ply_vertices, write_summary, ErrorMetric, IoError};

use crate::config::Args;

pub const SUMMARY_FILE: &str = "summary.json";

/// Settings for one batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub bins: u32,
    pub jobs: usize,
    pub plots: bool,
    pub extension: String,
}

impl From<&Args> for BatchConfig {
    fn from(args: &Args) -> Self {
        Self {
            input_dir: args.input_dir.clone(),
            output_dir: args.output_dir(),
            bins: args.bins,
            jobs: args.jobs(),
            plots: !args.no_plots,
            extension: args.extension.clone(),
        }
    }
}

/// What happened to a single mesh file.
#[derive(Debug)]
pub enum MeshOutcome {
    Processed(MeshResult),
    /// The file held no vertices.
    Skipped(String),
    /// Reading, analysis or artifact writing failed.
    Failed(String, String),
}

/// Result of a finished batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Summary rows in input-file order.
    pub results: Vec<MeshResult>,
    pub skipped: Vec<String>,
    /// `(file, reason)` for each mesh that failed.
    pub failed: Vec<(String, String)>,
    pub summary_path: PathBuf,
}

/// Lists mesh files with the given extension, sorted by file name.
pub fn discover_meshes(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read input directory {}", dir.display()))?;

    let mut meshes = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("Failed to list {}", dir.display()))?.path();
        if path.is_file() && path.extension().map_or(false, |e| e == extension) {
            meshes.push(path);
        }
    }
    meshes.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(meshes)
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

/// Runs every mesh of a directory through the pipeline on a pool of scoped
/// worker threads and writes the summary.
///
/// Workers pull the next file index from a shared counter; results are put
/// back into sorted-input order before the summary is written, so output does
/// not depend on the number of workers.
pub struct BatchRunner {
    config: BatchConfig,
    quantizer: UniformQuantizer,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Result<Self> {
        let quantizer = UniformQuantizer::new(config.bins)?;
        Ok(Self { config, quantizer })
    }

    pub fn run(&self) -> Result<BatchReport> {
        let meshes = discover_meshes(&self.config.input_dir, &self.config.extension)?;
        fs::create_dir_all(&self.config.output_dir)
            .with_context(|| format!("Failed to create output directory {}", self.config.output_dir.display()))?;

        info!(
            "Found {} .{} mesh(es) in {} ({} bins, {} worker(s))",
            meshes.len(),
            self.config.extension,
            self.config.input_dir.display(),
            self.quantizer.bins(),
            self.config.jobs.min(meshes.len()).max(1),
        );

        let mut report = BatchReport::default();
        for outcome in self.process_all(&meshes)? {
            match outcome {
                MeshOutcome::Processed(result) => report.results.push(result),
                MeshOutcome::Skipped(file) => report.skipped.push(file),
                MeshOutcome::Failed(file, reason) => report.failed.push((file, reason)),
            }
        }

        report.summary_path = self.config.output_dir.join(SUMMARY_FILE);
        write_summary(&report.summary_path, &report.results)?;

        info!(
            "Batch finished: {} processed, {} skipped, {} failed.",
            report.results.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn process_all(&self, meshes: &[PathBuf]) -> Result<Vec<MeshOutcome>> {
        let workers = self.config.jobs.min(meshes.len()).max(1);
        let cursor = AtomicUsize::new(0);
        let next = &cursor;

        let mut indexed: Vec<(usize, MeshOutcome)> = crossbeam_utils::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(move |_| {
                    scope.spawn(move |_| {
                        let mut done = Vec::new();
                        loop {
                            let i = next.fetch_add(1, Ordering::Relaxed);
                            if i >= meshes.len() {
                                break;
                            }
                            done.push((i, self.process_mesh(&meshes[i])));
                        }
                        done
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().map_err(|_| anyhow!("Mesh worker thread panicked")))
                .collect::<Result<Vec<_>>>()
        })
        .map_err(|_| anyhow!("Mesh worker scope panicked"))??
        .into_iter()
        .flatten()
        .collect();

        indexed.sort_by_key(|(i, _)| *i);
        Ok(indexed.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// Reads, analyzes and writes artifacts for one mesh. Never aborts the batch.
    pub fn process_mesh(&self, path: &Path) -> MeshOutcome {
        let file = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path_string(path));
        info!("Processing {}...", file);

        let scan = match load_obj_vertices(path) {
            Ok(scan) => scan,
            Err(e) => {
                error!("{}: {}", file, e);
                return MeshOutcome::Failed(file, e.to_string());
            }
        };

        if scan.vertices.is_empty() {
            warn!("{}: no vertices found, skipping.", file);
            return MeshOutcome::Skipped(file);
        }

        let analysis = match analyze_mesh(&scan.vertices, &self.quantizer) {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("{}: {}", file, e);
                return MeshOutcome::Failed(file, e.to_string());
            }
        };
        info!("{}: {} vertices, min {:?}, max {:?}", file, analysis.vertex_count, analysis.stats.min, analysis.stats.max);
        info!("{}: mean {:?}, std {:?}", file, analysis.stats.mean, analysis.stats.std);
        for o in &analysis.outcomes {
            info!("{}: {} MSE {:?} MAE {:?}", file, o.strategy.display_name(), o.errors.mse, o.errors.mae);
        }

        let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| file.clone());
        let row = self
            .write_artifacts(&stem, &scan.vertices, &analysis)
            .map_err(|e| e.to_string())
            .and_then(|artifacts| {
                MeshResult::new(file.clone(), self.quantizer.bins(), &analysis, artifacts).map_err(|e| e.to_string())
            });
        match row {
            Ok(result) => MeshOutcome::Processed(result),
            Err(reason) => {
                error!("{}: {}", file, reason);
                MeshOutcome::Failed(file, reason)
            }
        }
    }

    fn write_artifacts(&self, stem: &str, original: &[Point3], analysis: &MeshAnalysis) -> Result<ArtifactPaths, IoError> {
        let out = &self.config.output_dir;
        let mut artifacts = ArtifactPaths::default();

        for o in &analysis.outcomes {
            let label = o.strategy.label();
            let ply = out.join(format!("{}_{}.ply", stem, label));
            write_ply_vertices(&ply, &o.reconstructed)?;

            let scatter = if self.config.plots {
                let path = out.join(format!("{}_{}_scatter.svg", stem, label));
                let title = format!("{} - {} reconstruction", stem, o.strategy.display_name());
                render_scatter_comparison(&path, &title, original, &o.reconstructed)?;
                Some(path_string(&path))
            } else {
                None
            };
            artifacts.set_reconstruction(o.strategy, Some(path_string(&ply)), scatter);
        }

        if self.config.plots {
            let mse: Vec<_> = analysis.outcomes.iter().map(|o| (o.strategy, o.errors.mse)).collect();
            let mae: Vec<_> = analysis.outcomes.iter().map(|o| (o.strategy, o.errors.mae)).collect();

            let mse_plot = out.join(format!("{}_mse.svg", stem));
            render_error_bars(&mse_plot, stem, ErrorMetric::Mse, &mse)?;
            let mae_plot = out.join(format!("{}_mae.svg", stem));
            render_error_bars(&mae_plot, stem, ErrorMetric::Mae, &mae)?;

            artifacts.mse_plot = Some(path_string(&mse_plot));
            artifacts.mae_plot = Some(path_string(&mae_plot));
        }

        Ok(artifacts)
    }
}
