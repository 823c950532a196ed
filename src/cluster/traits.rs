use super::ClusterAssignment;
use crate::distance::DistanceMatrix;
use crate::error::Result;

/// Common interface for hard clustering over a precomputed distance matrix.
pub trait Clustering {
    /// Fit the model and return one cluster label per item.
    fn fit_predict(&self, distances: &DistanceMatrix) -> Result<ClusterAssignment>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
