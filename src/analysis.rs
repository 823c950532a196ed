//! End-to-end comparison of a set of recorded traces.
//!
//! [`Analysis::run`] normalizes every trace, drops the ones that are too short
//! to compare, builds the Fréchet distance matrix, clusters it and scores the
//! result. Everything is returned as plain data in an [`AnalysisReport`] for
//! whatever renders dendrograms or overlays downstream.
//!
//! ```rust
//! use aimtrace::analysis::{Analysis, AnalysisParams, Trace};
//! use aimtrace::RawSample;
//!
//! let straight = |slope: f64| -> Vec<RawSample> {
//!     (0..10).map(|i| RawSample::new(i as f64, slope * i as f64)).collect()
//! };
//! let traces = vec![
//!     Trace::new("human_seed_1.csv", straight(1.0)),
//!     Trace::new("human_seed_2.csv", straight(1.05)),
//!     Trace::new("automated_seed_1.csv", straight(8.0)),
//!     Trace::new("automated_seed_2.csv", vec![RawSample::new(0.0, 0.0)]),
//! ];
//!
//! let report = Analysis::new(AnalysisParams::default().with_clusters(2))
//!     .run(traces)
//!     .unwrap();
//! assert_eq!(report.traces.len(), 3);
//! assert_eq!(report.excluded.len(), 1);
//! assert_eq!(report.assignment.labels(), &[1, 1, 2]);
//! assert!(report.silhouette.unwrap() > 0.0);
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::cluster::{
    silhouette_samples, ClusterAssignment, HierarchicalClustering, Linkage, LinkageTree,
};
use crate::distance::{DistanceMatrix, DistanceMatrixBuilder};
use crate::error::{Error, Result};
use crate::trajectory::{normalize, RawSample, Trajectory};

/// Who produced a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceOrigin {
    /// Recorded from a person (`human_seed_*`).
    Human,
    /// Produced by the automated controller (`automated_seed_*`).
    Automated,
    /// Name matched neither prefix.
    Unknown,
}

impl TraceOrigin {
    /// Infer the origin from a per-seed file name such as `human_seed_3.csv`
    /// or `automated_seed_0.5.csv`. Directory components are ignored.
    pub fn from_file_name(name: &str) -> Self {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let base = base.to_ascii_lowercase();
        if base.starts_with("human_seed_") {
            Self::Human
        } else if base.starts_with("automated_seed_") {
            Self::Automated
        } else {
            Self::Unknown
        }
    }

    /// Single-letter tag used in dendrogram labels.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Human => "H",
            Self::Automated => "A",
            Self::Unknown => "?",
        }
    }
}

/// Upper edges of the seed colour buckets; seeds above the last edge fall in
/// the final bucket.
pub const SEED_BUCKET_EDGES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Parse the seed out of a `*_seed_<seed>.csv` file name.
///
/// Returns `None` when the name has no `_seed_` marker or the remainder is not
/// a finite number.
pub fn seed_from_file_name(name: &str) -> Option<f64> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let rest = base.split("_seed_").nth(1)?;
    let seed: f64 = rest.trim_end_matches(['.', 'c', 's', 'v']).parse().ok()?;
    seed.is_finite().then_some(seed)
}

/// Colour bucket of a seed: `0` for `seed <= 0.2`, then one bucket per 0.2 step
/// up to `4` for anything above 0.8.
pub fn seed_bucket(seed: f64) -> usize {
    SEED_BUCKET_EDGES
        .iter()
        .position(|&edge| seed <= edge)
        .unwrap_or(SEED_BUCKET_EDGES.len())
}

/// A named raw trace.
#[derive(Clone, Debug)]
pub struct Trace {
    /// Trace name, usually the source file name.
    pub name: String,
    /// Who produced the trace.
    pub origin: TraceOrigin,
    /// Controller seed encoded in the name, if any.
    pub seed: Option<f64>,
    /// Raw samples in recording order.
    pub samples: Vec<RawSample>,
}

impl Trace {
    /// Create a trace, inferring its origin and seed from `name`.
    pub fn new(name: impl Into<String>, samples: Vec<RawSample>) -> Self {
        let name = name.into();
        let origin = TraceOrigin::from_file_name(&name);
        let seed = seed_from_file_name(&name);
        Self {
            name,
            origin,
            seed,
            samples,
        }
    }
}

/// Analysis configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Number of flat clusters to cut the dendrogram into.
    pub n_clusters: usize,

    /// Cluster linkage.
    pub linkage: Linkage,

    /// Evaluate the distance matrix on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            linkage: Linkage::Average,
            parallel: true,
        }
    }
}

impl AnalysisParams {
    /// Set the number of flat clusters.
    pub fn with_clusters(mut self, n_clusters: usize) -> Self {
        self.n_clusters = n_clusters;
        self
    }

    /// Set the cluster linkage.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Toggle the parallel distance matrix.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Name and origin of a trace kept for comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceInfo {
    /// Trace name, usually the source file name.
    pub name: String,
    /// Who produced the trace.
    pub origin: TraceOrigin,
    /// Controller seed encoded in the name, if any.
    pub seed: Option<f64>,
}

impl TraceInfo {
    /// Colour bucket of the seed (see [`seed_bucket`]).
    pub fn seed_bucket(&self) -> Option<usize> {
        self.seed.map(seed_bucket)
    }
}

/// A trace dropped before the distance matrix was built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// Trace name.
    pub name: String,
    /// Why it could not be normalized.
    pub reason: String,
}

/// Composition of one non-empty flat cluster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Cluster id (`1..=K`).
    pub id: usize,
    /// Indices into [`AnalysisReport::traces`].
    pub members: Vec<usize>,
    /// Members recorded from a person.
    pub human: usize,
    /// Members produced by the automated controller.
    pub automated: usize,
    /// Mean silhouette of the members, when the overall score is defined.
    pub silhouette: Option<f64>,
}

/// Everything the pipeline produced. Index `i` refers to the same trace in
/// `traces`, `trajectories`, the matrix rows and the assignment.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    pub traces: Vec<TraceInfo>,
    pub excluded: Vec<Exclusion>,
    pub trajectories: Vec<Trajectory>,
    pub distances: DistanceMatrix,
    pub tree: LinkageTree,
    pub assignment: ClusterAssignment,
    /// Overall silhouette; `None` when validity is undefined (one cluster, or
    /// every trace alone).
    pub silhouette: Option<f64>,
    pub clusters: Vec<ClusterSummary>,
}

impl AnalysisReport {
    /// Dendrogram leaf labels, `"H:<name>"` / `"A:<name>"`.
    pub fn leaf_labels(&self) -> Vec<String> {
        self.traces
            .iter()
            .map(|t| format!("{}:{}", t.origin.tag(), t.name))
            .collect()
    }
}

/// Runs the normalize → distance → cluster → validate pipeline.
#[derive(Clone, Debug, Default)]
pub struct Analysis {
    params: AnalysisParams,
}

impl Analysis {
    /// Create a pipeline with the given parameters.
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    /// Run the full pipeline.
    ///
    /// Traces that cannot be normalized are recorded in
    /// [`AnalysisReport::excluded`] and skipped. Fewer than two survivors is
    /// fatal ([`Error::InsufficientTrajectories`]).
    ///
    /// A cluster count outside `1..=N` is clamped (see
    /// [`HierarchicalClustering::fit`]) and leaves the silhouette undefined.
    /// A non-finite distance aborts the run with [`Error::NumericAnomaly`].
    pub fn run(&self, traces: Vec<Trace>) -> Result<AnalysisReport> {
        info!("analysing {} traces", traces.len());

        let mut kept = Vec::with_capacity(traces.len());
        let mut trajectories = Vec::with_capacity(traces.len());
        let mut excluded = Vec::new();
        for trace in traces {
            match normalize(&trace.samples) {
                Ok(traj) => {
                    kept.push(TraceInfo {
                        name: trace.name,
                        origin: trace.origin,
                        seed: trace.seed,
                    });
                    trajectories.push(traj);
                }
                Err(err) => {
                    warn!("excluding trace {}: {err}", trace.name);
                    excluded.push(Exclusion {
                        name: trace.name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        if trajectories.len() < 2 {
            return Err(Error::InsufficientTrajectories {
                found: trajectories.len(),
            });
        }

        let distances = DistanceMatrixBuilder::new()
            .with_parallel(self.params.parallel)
            .build(&trajectories)?;

        let fit = HierarchicalClustering::new(self.params.n_clusters)
            .with_linkage(self.params.linkage)
            .fit(&distances)?;

        let samples = match silhouette_samples(&distances, &fit.assignment) {
            Ok(samples) => Some(samples),
            Err(Error::DegenerateClustering { clusters, n_items }) => {
                info!("silhouette undefined: {clusters} clusters over {n_items} traces");
                None
            }
            Err(err) => return Err(err),
        };
        let silhouette = samples
            .as_ref()
            .map(|s| s.iter().sum::<f64>() / s.len() as f64);
        if let Some(score) = silhouette {
            info!("silhouette score: {score:.3}");
        }

        let clusters = summarize(&fit.assignment, &kept, samples.as_deref());

        Ok(AnalysisReport {
            traces: kept,
            excluded,
            trajectories,
            distances,
            tree: fit.tree,
            assignment: fit.assignment,
            silhouette,
            clusters,
        })
    }
}

fn summarize(
    assignment: &ClusterAssignment,
    traces: &[TraceInfo],
    samples: Option<&[f64]>,
) -> Vec<ClusterSummary> {
    (1..=assignment.n_clusters())
        .filter_map(|id| {
            let members = assignment.members(id);
            if members.is_empty() {
                return None;
            }
            let count = |origin: TraceOrigin| {
                members
                    .iter()
                    .filter(|&&i| traces[i].origin == origin)
                    .count()
            };
            let silhouette = samples
                .map(|s| members.iter().map(|&i| s[i]).sum::<f64>() / members.len() as f64);
            Some(ClusterSummary {
                id,
                human: count(TraceOrigin::Human),
                automated: count(TraceOrigin::Automated),
                silhouette,
                members,
            })
        })
        .collect()
}
