//! Shape comparison and clustering of recorded movement traces.
//!
//! `aimtrace` compares 2-D control traces (for example human versus automated
//! aim movements) by shape and groups them into behaviorally similar clusters:
//!
//! - [`trajectory`]: CSV records, angle unwrapping and quadrant normalization
//! - [`distance`]: discrete Fréchet distance and the pairwise distance matrix
//! - [`cluster`]: average-linkage hierarchical clustering and silhouette validity
//! - [`analysis`]: the whole pipeline over a set of named traces
//!
//! Rendering (dendrograms, overlays) is left to the caller; every stage returns
//! plain, serializable data.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod cluster;
pub mod distance;
pub mod error;
pub mod trajectory;

pub use analysis::{Analysis, AnalysisParams, AnalysisReport, Trace, TraceOrigin};
pub use cluster::{
    silhouette_score, ClusterAssignment, Clustering, HierarchicalClustering, Linkage, LinkageTree,
};
pub use distance::{discrete_frechet, DistanceMatrix, DistanceMatrixBuilder};
pub use error::{Error, Result};
pub use trajectory::{normalize, RawSample, Trajectory};
