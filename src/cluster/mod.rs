//! Clustering over precomputed trajectory distances.
//!
//! Traces are compared pairwise (see [`crate::distance`]); this module groups
//! them from the resulting [`DistanceMatrix`](crate::distance::DistanceMatrix)
//! and scores the grouping.
//!
//! ## Hierarchical (agglomerative) clustering
//!
//! Bottom-up: start with each trace as its own cluster, repeatedly merge the
//! two closest clusters until one remains. The merge history forms a
//! **dendrogram**, a binary tree you can cut to get k clusters. Only the
//! distance matrix is needed, which is what makes it a fit for Fréchet
//! distances: there is no "mean trajectory" to compute.
//!
//! ## Validity
//!
//! The silhouette contrasts how close each trace sits to its own cluster with
//! how close it sits to the nearest other one. Values near 1 mean tight,
//! well-separated clusters; near 0, overlapping ones; negative, likely
//! misassigned traces.
//!
//! ## Usage
//!
//! ```rust
//! use aimtrace::cluster::{silhouette_score, Clustering, HierarchicalClustering};
//! use aimtrace::distance::DistanceMatrix;
//!
//! let d = DistanceMatrix::from_rows(&[
//!     vec![0.0, 0.1, 9.0, 9.0],
//!     vec![0.1, 0.0, 9.0, 9.0],
//!     vec![9.0, 9.0, 0.0, 0.2],
//!     vec![9.0, 9.0, 0.2, 0.0],
//! ])
//! .unwrap();
//!
//! let fit = HierarchicalClustering::new(2).fit(&d).unwrap();
//! assert_eq!(fit.assignment.labels(), &[1, 1, 2, 2]);
//! assert_eq!(fit.tree.merges().len(), 3);
//!
//! let score = silhouette_score(&d, &fit.assignment).unwrap();
//! assert!(score > 0.9);
//! ```

mod assignment;
mod hierarchical;
mod silhouette;
mod traits;
mod util;

pub use assignment::ClusterAssignment;
pub use hierarchical::{HierarchicalClustering, HierarchicalFit, Linkage, LinkageTree, Merge};
pub use silhouette::{silhouette_samples, silhouette_score};
pub use traits::Clustering;
