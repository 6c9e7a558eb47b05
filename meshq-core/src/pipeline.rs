use log::debug;

use crate::error::CoreError;
use crate::metrics::{compute_errors, ErrorRecord};
use crate::normalize::{NormalizationParams, Strategy};
use crate::quantize::UniformQuantizer;
use crate::reconstruct::reconstruct;
use crate::stats::MeshStats;
use crate::vertex::Point3;

/// One strategy's round trip over a mesh.
#[derive(Clone, Debug)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub params: NormalizationParams,
    pub reconstructed: Vec<Point3>,
    pub errors: ErrorRecord,
}

/// Everything the numeric pipeline learns about one mesh.
#[derive(Clone, Debug)]
pub struct MeshAnalysis {
    pub vertex_count: usize,
    pub stats: MeshStats,
    /// One entry per strategy, in `Strategy::ALL` order.
    pub outcomes: Vec<StrategyOutcome>,
}

impl MeshAnalysis {
    pub fn outcome(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }
}

/// Normalize, quantize, reconstruct and score `points` under one strategy.
pub fn run_strategy(
    points: &[Point3],
    strategy: Strategy,
    quantizer: &UniformQuantizer,
) -> Result<StrategyOutcome, CoreError> {
    let normalized = strategy.normalize(points)?;
    let reconstruction = reconstruct(&normalized, quantizer);
    let errors = compute_errors(points, &reconstruction.points)?;

    debug!("{} params: {:?}", strategy.display_name(), normalized.params);
    debug!("{} MSE: {:?} MAE: {:?}", strategy.display_name(), errors.mse, errors.mae);

    Ok(StrategyOutcome {
        strategy,
        params: normalized.params,
        reconstructed: reconstruction.points,
        errors,
    })
}

/// Runs every strategy over one mesh.
///
/// # Errors
/// `EmptyVertexSet` for a mesh without vertices; the caller skips the mesh.
pub fn analyze_mesh(points: &[Point3], quantizer: &UniformQuantizer) -> Result<MeshAnalysis, CoreError> {
    let stats = MeshStats::compute(points)?;
    debug!("Total vertices: {} Mean: {:?} Std: {:?}", points.len(), stats.mean, stats.std);

    let outcomes = Strategy::ALL
        .iter()
        .map(|&s| run_strategy(points, s, quantizer))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MeshAnalysis { vertex_count: points.len(), stats, outcomes })
}
