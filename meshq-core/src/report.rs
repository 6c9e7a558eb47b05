use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::normalize::Strategy;
use crate::pipeline::MeshAnalysis;
use crate::stats::MeshStats;
use crate::vertex::Point3;

/// Locations of the files written for one mesh. `None` when not produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub mse_plot: Option<String>,
    pub mae_plot: Option<String>,
    pub minmax_ply: Option<String>,
    pub unitsphere_ply: Option<String>,
    pub minmax_scatter: Option<String>,
    pub unitsphere_scatter: Option<String>,
}

impl ArtifactPaths {
    /// Records the reconstruction files written for `strategy`.
    pub fn set_reconstruction(&mut self, strategy: Strategy, ply: Option<String>, scatter: Option<String>) {
        match strategy {
            Strategy::MinMax => {
                self.minmax_ply = ply;
                self.minmax_scatter = scatter;
            }
            Strategy::UnitSphere => {
                self.unitsphere_ply = ply;
                self.unitsphere_scatter = scatter;
            }
        }
    }
}

/// One row of the batch summary.
///
/// Built once per processed mesh and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshResult {
    pub file: String,
    pub vertices: usize,
    pub bins: u32,
    pub minmax_mse: Point3,
    pub minmax_mae: Point3,
    pub unitsphere_mse: Point3,
    pub unitsphere_mae: Point3,
    #[serde(flatten)]
    pub artifacts: ArtifactPaths,
    pub stats: MeshStats,
}

impl MeshResult {
    /// Builds the summary row for an analyzed mesh.
    ///
    /// # Errors
    /// `MissingOutcome` if `analysis` lacks either strategy.
    pub fn new(
        file: impl Into<String>,
        bins: u32,
        analysis: &MeshAnalysis,
        artifacts: ArtifactPaths,
    ) -> Result<Self, CoreError> {
        let errors = |s: Strategy| analysis.outcome(s).map(|o| o.errors).ok_or(CoreError::MissingOutcome(s));
        let mm = errors(Strategy::MinMax)?;
        let us = errors(Strategy::UnitSphere)?;

        Ok(Self {
            file: file.into(),
            vertices: analysis.vertex_count,
            bins,
            minmax_mse: mm.mse,
            minmax_mae: mm.mae,
            unitsphere_mse: us.mse,
            unitsphere_mae: us.mae,
            artifacts,
            stats: analysis.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze_mesh;
    use crate::quantize::UniformQuantizer;

    #[test]
    fn copies_errors_per_strategy() {
        let pts = vec![[0.0, 0.0, 0.0], [3.0, 1.0, 0.5], [1.0, 2.0, -4.0]];
        let analysis = analyze_mesh(&pts, &UniformQuantizer::new(8).unwrap()).unwrap();
        let artifacts = ArtifactPaths { mse_plot: Some("out/a_mse.svg".into()), ..Default::default() };
        let row = MeshResult::new("a.obj", 8, &analysis, artifacts).unwrap();

        assert_eq!(row.file, "a.obj");
        assert_eq!(row.vertices, 3);
        assert_eq!(row.minmax_mse, analysis.outcome(Strategy::MinMax).unwrap().errors.mse);
        assert_eq!(row.unitsphere_mae, analysis.outcome(Strategy::UnitSphere).unwrap().errors.mae);
        assert_eq!(row.artifacts.mse_plot.as_deref(), Some("out/a_mse.svg"));
        assert!(row.artifacts.mae_plot.is_none());
    }

    #[test]
    fn missing_strategy_is_an_error() {
        let pts = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let mut analysis = analyze_mesh(&pts, &UniformQuantizer::default()).unwrap();
        analysis.outcomes.retain(|o| o.strategy != Strategy::UnitSphere);

        let err = MeshResult::new("b.obj", 1024, &analysis, ArtifactPaths::default()).unwrap_err();
        assert_eq!(err, CoreError::MissingOutcome(Strategy::UnitSphere));
        assert!(err.to_string().contains("Unit Sphere"));
    }

    #[test]
    fn reconstruction_paths_land_on_their_strategy() {
        let mut paths = ArtifactPaths::default();
        paths.set_reconstruction(Strategy::UnitSphere, Some("m_unitsphere.ply".into()), None);
        assert_eq!(paths.unitsphere_ply.as_deref(), Some("m_unitsphere.ply"));
        assert!(paths.minmax_ply.is_none());
        assert!(paths.unitsphere_scatter.is_none());
    }
}
