//! Silhouette validity for a flat clustering over precomputed distances.
//!
//! For item `i` in cluster `C`:
//!
//! ```text
//! a(i) = mean distance from i to the other members of C
//! b(i) = min over clusters C' != C of the mean distance from i to members of C'
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//! ```
//!
//! `s(i)` is 0 for items in singleton clusters and when `a` and `b` are both 0.
//! The score is the mean of `s(i)` and lies in `[-1, 1]`.
//!
//! It is only defined for 2 ≤ (non-empty clusters) ≤ N − 1.
//!
//! # References
//!
//! Rousseeuw, P. J. (1987). "Silhouettes: a graphical aid to the interpretation
//! and validation of cluster analysis." J. Comput. Appl. Math. 20, 53–65.

use super::ClusterAssignment;
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// Per-item silhouette values.
///
/// Returns [`Error::DegenerateClustering`] when the assignment has a single
/// non-empty cluster or puts every item alone.
pub fn silhouette_samples(
    distances: &DistanceMatrix,
    assignment: &ClusterAssignment,
) -> Result<Vec<f64>> {
    let n = distances.len();
    if assignment.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: assignment.len(),
        });
    }

    let sizes = assignment.sizes();
    let clusters = sizes.iter().filter(|&&s| s > 0).count();
    if clusters < 2 || clusters >= n {
        return Err(Error::DegenerateClustering {
            clusters,
            n_items: n,
        });
    }

    let k = assignment.n_clusters();
    let labels = assignment.labels();
    let mut sums = vec![0.0f64; k];
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        sums.iter_mut().for_each(|s| *s = 0.0);
        for (j, &d) in distances.row(i).iter().enumerate() {
            sums[labels[j] - 1] += d;
        }

        let own = labels[i] - 1;
        if sizes[own] == 1 {
            out.push(0.0);
            continue;
        }
        // The diagonal entry is 0, so the row sum already excludes `i` itself.
        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = sums
            .iter()
            .zip(&sizes)
            .enumerate()
            .filter(|&(c, (_, &size))| c != own && size > 0)
            .map(|(_, (&sum, &size))| sum / size as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        out.push(if denom > 0.0 { (b - a) / denom } else { 0.0 });
    }

    Ok(out)
}

/// Mean silhouette over all items.
pub fn silhouette_score(distances: &DistanceMatrix, assignment: &ClusterAssignment) -> Result<f64> {
    let samples = silhouette_samples(distances, assignment)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix(rows: &[&[f64]]) -> DistanceMatrix {
        let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        DistanceMatrix::from_rows(&rows).unwrap()
    }

    fn labels(l: &[usize]) -> ClusterAssignment {
        ClusterAssignment::new(l.to_vec()).unwrap()
    }

    #[test]
    fn two_tight_pairs() {
        let m = matrix(&[
            &[0.0, 1.0, 10.0, 10.0],
            &[1.0, 0.0, 10.0, 10.0],
            &[10.0, 10.0, 0.0, 1.0],
            &[10.0, 10.0, 1.0, 0.0],
        ]);
        let s = silhouette_samples(&m, &labels(&[1, 1, 2, 2])).unwrap();
        for v in &s {
            assert_relative_eq!(*v, 0.9);
        }
        assert_relative_eq!(silhouette_score(&m, &labels(&[1, 1, 2, 2])).unwrap(), 0.9);
    }

    #[test]
    fn bad_assignment_is_negative() {
        let m = matrix(&[
            &[0.0, 1.0, 10.0, 10.0],
            &[1.0, 0.0, 10.0, 10.0],
            &[10.0, 10.0, 0.0, 1.0],
            &[10.0, 10.0, 1.0, 0.0],
        ]);
        let score = silhouette_score(&m, &labels(&[1, 2, 1, 2])).unwrap();
        assert!(score < 0.0);
    }

    #[test]
    fn singleton_contributes_zero() {
        let m = matrix(&[&[0.0, 1.0, 4.0], &[1.0, 0.0, 5.0], &[4.0, 5.0, 0.0]]);
        let s = silhouette_samples(&m, &labels(&[1, 1, 2])).unwrap();
        assert_relative_eq!(s[0], 0.75);
        assert_relative_eq!(s[1], 0.8);
        assert_eq!(s[2], 0.0);
    }

    #[test]
    fn coincident_items_score_zero() {
        let m = matrix(&[
            &[0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let s = silhouette_samples(&m, &labels(&[1, 1, 2])).unwrap();
        assert_eq!(s, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_cluster_ids_are_ignored() {
        let m = matrix(&[&[0.0, 1.0, 4.0], &[1.0, 0.0, 5.0], &[4.0, 5.0, 0.0]]);
        let sparse = silhouette_samples(&m, &labels(&[1, 1, 3])).unwrap();
        let dense = silhouette_samples(&m, &labels(&[1, 1, 2])).unwrap();
        assert_eq!(sparse, dense);
    }

    #[test]
    fn degenerate_assignments_are_undefined() {
        let m = matrix(&[&[0.0, 1.0, 4.0], &[1.0, 0.0, 5.0], &[4.0, 5.0, 0.0]]);
        assert!(matches!(
            silhouette_score(&m, &labels(&[1, 1, 1])),
            Err(Error::DegenerateClustering { clusters: 1, n_items: 3 })
        ));
        assert!(matches!(
            silhouette_score(&m, &labels(&[1, 2, 3])),
            Err(Error::DegenerateClustering { clusters: 3, n_items: 3 })
        ));
    }

    #[test]
    fn length_mismatch() {
        let m = matrix(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert!(matches!(
            silhouette_score(&m, &labels(&[1, 2, 1])),
            Err(Error::DimensionMismatch { expected: 2, found: 3 })
        ));
    }
}
