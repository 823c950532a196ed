//! Agglomerative hierarchical clustering over a precomputed distance matrix.
//!
//! Every item starts as its own cluster. At each step the two clusters with
//! the smallest linkage distance are merged, until one cluster remains. The
//! N−1 merges form a binary [`LinkageTree`] (a dendrogram) that can be cut
//! into any number of flat clusters.
//!
//! # Linkage
//!
//! | Linkage | Cluster distance | Effect |
//! |---------|------------------|--------|
//! | Single | min over member pairs | Chaining; elongated clusters |
//! | Complete | max over member pairs | Compact clusters |
//! | Average | mean over member pairs | Balanced compromise (default) |
//!
//! Distances to a newly merged cluster are updated with the Lance–Williams
//! recurrence, so the member-pair distances never need to be revisited.
//!
//! # Determinism
//!
//! The closest pair is found by scanning active clusters in slot order and
//! keeping the first strict minimum. Equal distances are therefore resolved
//! by item index, and the merge sequence depends only on the matrix.
//!
//! # Complexity
//!
//! O(N³) time and O(N²) space. Trace collections are small (tens to a few
//! hundred items), where the Fréchet matrix dominates the total cost anyway.
//!
//! # Tree layout
//!
//! Leaves are `0..N`. The node created by merge `s` has id `N + s`. Rows of
//! [`LinkageTree::to_matrix`] are `[left, right, distance, size]`, the layout
//! dendrogram renderers expect.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::traits::Clustering;
use super::util::UnionFind;
use super::ClusterAssignment;
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// How the distance between two clusters is derived from member distances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Nearest members.
    Single,
    /// Farthest members.
    Complete,
    /// Mean over all member pairs (UPGMA).
    #[default]
    Average,
}

impl Linkage {
    /// Distance from some cluster `k` to the union of clusters `i` and `j`.
    #[inline]
    fn update(self, d_ik: f64, d_jk: f64, size_i: usize, size_j: usize) -> f64 {
        match self {
            Self::Single => d_ik.min(d_jk),
            Self::Complete => d_ik.max(d_jk),
            Self::Average => {
                let (wi, wj) = (size_i as f64, size_j as f64);
                (wi * d_ik + wj * d_jk) / (wi + wj)
            }
        }
    }
}

/// One merge in a [`LinkageTree`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Merge {
    /// Smaller child node id.
    pub left: usize,
    /// Larger child node id.
    pub right: usize,
    /// Linkage distance at which the children merged.
    pub distance: f64,
    /// Number of leaves under the new node.
    pub size: usize,
}

/// Binary merge history over N items.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkageTree {
    n_leaves: usize,
    linkage: Linkage,
    merges: Vec<Merge>,
}

impl LinkageTree {
    /// Run agglomerative clustering to completion.
    pub fn build(distances: &DistanceMatrix, linkage: Linkage) -> Result<Self> {
        let n = distances.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut work = distances.as_slice().to_vec();
        let mut active = vec![true; n];
        let mut size = vec![1usize; n];
        // Slot -> current tree node id.
        let mut node: Vec<usize> = (0..n).collect();
        let mut merges = Vec::with_capacity(n - 1);

        for step in 0..n - 1 {
            let (a, b, dist) = closest_pair(&work, &active, n);

            let (left, right) = if node[a] < node[b] {
                (node[a], node[b])
            } else {
                (node[b], node[a])
            };
            let merged_size = size[a] + size[b];
            merges.push(Merge {
                left,
                right,
                distance: dist,
                size: merged_size,
            });
            debug!("merge {step}: {left} + {right} at {dist:.6} (size {merged_size})");

            // Slot `a` becomes the merged cluster; slot `b` retires.
            for k in 0..n {
                if !active[k] || k == a || k == b {
                    continue;
                }
                let d = linkage.update(work[a * n + k], work[b * n + k], size[a], size[b]);
                work[a * n + k] = d;
                work[k * n + a] = d;
            }
            active[b] = false;
            size[a] = merged_size;
            node[a] = n + step;
        }

        Ok(Self {
            n_leaves: n,
            linkage,
            merges,
        })
    }

    /// Number of leaves (items).
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Linkage used to build the tree.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Merges in the order they happened.
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Id of the root node.
    pub fn root(&self) -> usize {
        self.n_leaves + self.merges.len() - 1
    }

    /// `[left, right, distance, size]` per merge.
    pub fn to_matrix(&self) -> Vec<[f64; 4]> {
        self.merges
            .iter()
            .map(|m| [m.left as f64, m.right as f64, m.distance, m.size as f64])
            .collect()
    }

    /// Leaves in dendrogram order (left subtree first at every node).
    pub fn leaf_order(&self) -> Vec<usize> {
        let n = self.n_leaves;
        let mut order = Vec::with_capacity(n);
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if id < n {
                order.push(id);
            } else {
                let m = &self.merges[id - n];
                stack.push(m.right);
                stack.push(m.left);
            }
        }
        order
    }

    /// Cut the tree into exactly `k` flat clusters.
    ///
    /// Replays the first `N − k` merges, so ties are settled by merge order.
    /// Labels are `1..=k`, numbered by first appearance in item order.
    pub fn cut(&self, k: usize) -> Result<ClusterAssignment> {
        let n = self.n_leaves;
        if k == 0 || k > n {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }

        let mut uf = UnionFind::new(n);
        // Node id -> some leaf under it.
        let mut leaf_of: Vec<usize> = (0..n).collect();
        for m in &self.merges[..n - k] {
            let leaf = leaf_of[m.left];
            uf.union(leaf, leaf_of[m.right]);
            leaf_of.push(leaf);
        }

        ClusterAssignment::new(uf.labels())
    }
}

/// First strict minimum over active pairs `(a, b)`, `a < b`, in slot order.
fn closest_pair(work: &[f64], active: &[bool], n: usize) -> (usize, usize, f64) {
    let mut best = (usize::MAX, usize::MAX, f64::INFINITY);
    for a in 0..n {
        if !active[a] {
            continue;
        }
        let row = &work[a * n..(a + 1) * n];
        for b in (a + 1)..n {
            if active[b] && (row[b] < best.2 || best.0 == usize::MAX) {
                best = (a, b, row[b]);
            }
        }
    }
    best
}

/// Result of [`HierarchicalClustering::fit`].
#[derive(Clone, Debug)]
pub struct HierarchicalFit {
    /// Full merge history.
    pub tree: LinkageTree,
    /// Flat cut at the configured cluster count.
    pub assignment: ClusterAssignment,
}

/// Agglomerative clustering with a flat cut at `n_clusters`.
#[derive(Clone, Debug)]
pub struct HierarchicalClustering {
    n_clusters: usize,
    linkage: Linkage,
}

impl HierarchicalClustering {
    /// Create a clusterer producing `n_clusters` flat clusters with average linkage.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            linkage: Linkage::default(),
        }
    }

    /// Set the linkage.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Build the linkage tree and cut it.
    ///
    /// A cluster count outside `1..=N` is clamped into it and logged: zero
    /// puts every item in one cluster, more than N leaves every item alone.
    /// The fit still succeeds; validity is then undefined.
    pub fn fit(&self, distances: &DistanceMatrix) -> Result<HierarchicalFit> {
        let n = distances.len();
        let tree = LinkageTree::build(distances, self.linkage)?;

        let k = self.n_clusters.clamp(1, n);
        if k != self.n_clusters {
            warn!(
                "requested {} clusters over {n} items; cutting into {k}",
                self.n_clusters
            );
        }

        let assignment = tree.cut(k)?;
        Ok(HierarchicalFit { tree, assignment })
    }
}

impl Default for HierarchicalClustering {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for HierarchicalClustering {
    fn fit_predict(&self, distances: &DistanceMatrix) -> Result<ClusterAssignment> {
        Ok(self.fit(distances)?.assignment)
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}
