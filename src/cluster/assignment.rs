use serde::Serialize;

use crate::error::{Error, Result};

/// Flat cluster labels, one per item, in `1..=n_clusters`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    n_clusters: usize,
}

impl ClusterAssignment {
    /// Wrap 1-based labels. The cluster count is the largest label.
    pub fn new(labels: Vec<usize>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::EmptyInput);
        }
        if labels.contains(&0) {
            return Err(Error::InvalidParameter {
                name: "labels",
                message: "cluster ids start at 1",
            });
        }
        let n_clusters = labels.iter().copied().max().unwrap_or(0);
        Ok(Self { labels, n_clusters })
    }

    /// Label per item, in item order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Cluster id of item `i`.
    pub fn label(&self, i: usize) -> usize {
        self.labels[i]
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed assignment.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of cluster ids (`K`), including any without members.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Member counts, indexed by `cluster - 1`.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.n_clusters];
        for &l in &self.labels {
            sizes[l - 1] += 1;
        }
        sizes
    }

    /// Number of clusters that have at least one member.
    pub fn non_empty_clusters(&self) -> usize {
        self.sizes().iter().filter(|&&s| s > 0).count()
    }

    /// Item indices in cluster `cluster`, ascending.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| (l == cluster).then_some(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_and_sizes() {
        let a = ClusterAssignment::new(vec![1, 3, 1, 3]).unwrap();
        assert_eq!(a.n_clusters(), 3);
        assert_eq!(a.sizes(), vec![2, 0, 2]);
        assert_eq!(a.non_empty_clusters(), 2);
        assert_eq!(a.members(1), vec![0, 2]);
        assert!(a.members(2).is_empty());
        assert_eq!(a.label(1), 3);
    }

    #[test]
    fn rejects_zero_and_empty() {
        assert!(matches!(
            ClusterAssignment::new(vec![]),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            ClusterAssignment::new(vec![1, 0]),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
