//! Discrete Fréchet distance.
//!
//! The distance between two point sequences `P` (length n) and `Q` (length m)
//! is the shortest leash that lets two walkers traverse `P` and `Q` front to
//! back, each step advancing one or both of them, without ever letting go.
//!
//! The coupling table is filled bottom-up, row-major:
//!
//! ```text
//! ca[0][0] = d(P0, Q0)
//! ca[i][0] = max(ca[i-1][0], d(Pi, Q0))
//! ca[0][j] = max(ca[0][j-1], d(P0, Qj))
//! ca[i][j] = max(min(ca[i-1][j], ca[i][j-1], ca[i-1][j-1]), d(Pi, Qj))
//! ```
//!
//! Every cell is computed once: O(n·m) time, O(n·m) space.
//!
//! # References
//!
//! Eiter, T., Mannila, H. (1994). "Computing Discrete Fréchet Distance."
//! Technical Report CD-TR 94/64, TU Wien.

use crate::error::{Error, Result};
use crate::trajectory::Point;

#[inline]
fn euclidean(a: Point, b: Point) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Dense coupling table stored as one row-major arena.
#[derive(Clone, Debug)]
pub struct CouplingTable {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl CouplingTable {
    /// Fill the table for `p` against `q`.
    pub fn compute(p: &[Point], q: &[Point]) -> Result<Self> {
        if p.is_empty() || q.is_empty() {
            return Err(Error::EmptyTrajectory);
        }
        // `f64::max` swallows NaN (and `inf - inf` makes one), so it has to
        // be caught before the fill.
        if p.iter().chain(q).flatten().any(|v| !v.is_finite()) {
            return Err(Error::numeric_anomaly("non-finite coordinate in frechet input"));
        }

        let (n, m) = (p.len(), q.len());
        let mut cells = vec![0.0f64; n * m];

        cells[0] = euclidean(p[0], q[0]);
        for j in 1..m {
            cells[j] = cells[j - 1].max(euclidean(p[0], q[j]));
        }
        for i in 1..n {
            let row = i * m;
            let prev = row - m;
            cells[row] = cells[prev].max(euclidean(p[i], q[0]));
            for j in 1..m {
                let reach = cells[prev + j].min(cells[row + j - 1]).min(cells[prev + j - 1]);
                cells[row + j] = reach.max(euclidean(p[i], q[j]));
            }
        }

        Ok(Self {
            rows: n,
            cols: m,
            cells,
        })
    }

    /// Table value at `(i, j)`: the leash needed to reach `P[i]`, `Q[j]` together.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.cols + j]
    }

    /// Shape `(n, m)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The Fréchet distance, `ca[n-1][m-1]`.
    pub fn distance(&self) -> f64 {
        self.cells[self.cells.len() - 1]
    }
}

/// Discrete Fréchet distance between two non-empty point sequences.
///
/// Returns [`Error::EmptyTrajectory`] if either side is empty and
/// [`Error::NumericAnomaly`] if the result is not a finite non-negative number.
///
/// ```rust
/// use aimtrace::distance::discrete_frechet;
///
/// let p = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
/// let q = [[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
/// assert_eq!(discrete_frechet(&p, &q).unwrap(), 1.0);
/// ```
pub fn discrete_frechet(p: &[Point], q: &[Point]) -> Result<f64> {
    let d = CouplingTable::compute(p, q)?.distance();
    if d.is_finite() && d >= 0.0 {
        Ok(d)
    } else {
        Err(Error::numeric_anomaly(format!(
            "frechet distance evaluated to {d} ({}x{} points)",
            p.len(),
            q.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_sequences_are_zero() {
        let p = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        assert_eq!(discrete_frechet(&p, &p).unwrap(), 0.0);
    }

    #[test]
    fn single_points() {
        let d = discrete_frechet(&[[0.0, 0.0]], &[[3.0, 4.0]]).unwrap();
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn different_lengths() {
        // Q has an extra sample in the middle of the same segment.
        let p = [[0.0, 0.0], [2.0, 0.0]];
        let q = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        assert_relative_eq!(discrete_frechet(&p, &q).unwrap(), 1.0);
        assert_relative_eq!(discrete_frechet(&q, &p).unwrap(), 1.0);
    }

    #[test]
    fn walk_order_matters() {
        // Same point set, reversed order: the leash must span the whole segment.
        let p = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        let q = [[2.0, 0.0], [1.0, 0.0], [0.0, 0.0]];
        assert_relative_eq!(discrete_frechet(&p, &q).unwrap(), 2.0);
    }

    #[test]
    fn right_angle_versus_diagonal() {
        let p = [[0.0, 0.0], [0.0, 2.0], [2.0, 2.0]];
        let q = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let d = discrete_frechet(&p, &q).unwrap();
        assert_relative_eq!(d, 2.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn table_boundary_rows_are_running_maxima() {
        let p = [[0.0, 0.0], [0.0, 3.0], [0.0, 1.0]];
        let q = [[0.0, 0.0]];
        let table = CouplingTable::compute(&p, &q).unwrap();
        assert_eq!(table.shape(), (3, 1));
        assert_eq!(table.get(0, 0), 0.0);
        assert_eq!(table.get(1, 0), 3.0);
        assert_eq!(table.get(2, 0), 3.0);
        assert_eq!(table.distance(), 3.0);
    }

    #[test]
    fn long_sequences_do_not_recurse() {
        let p: Vec<Point> = (0..2_000).map(|i| [i as f64, 0.0]).collect();
        let q: Vec<Point> = (0..2_000).map(|i| [i as f64, 0.5]).collect();
        assert_relative_eq!(discrete_frechet(&p, &q).unwrap(), 0.5);
    }

    #[test]
    fn empty_input_is_rejected() {
        let p = [[0.0, 0.0]];
        assert!(matches!(
            discrete_frechet(&p, &[]),
            Err(Error::EmptyTrajectory)
        ));
        assert!(matches!(
            discrete_frechet(&[], &p),
            Err(Error::EmptyTrajectory)
        ));
    }

    #[test]
    fn nan_is_an_anomaly() {
        let p = [[0.0, 0.0], [f64::NAN, 0.0]];
        let q = [[0.0, 0.0], [1.0, 0.0]];
        assert!(matches!(
            discrete_frechet(&p, &q),
            Err(Error::NumericAnomaly { .. })
        ));
    }

    #[test]
    fn infinite_coordinate_is_an_anomaly() {
        let p = [[f64::INFINITY, 0.0], [0.0, 0.0]];
        let q = [[f64::INFINITY, 0.0], [0.0, 0.0]];
        let err = CouplingTable::compute(&p, &q).unwrap_err();
        assert!(matches!(err, Error::NumericAnomaly { .. }));
        assert!(err.to_string().contains("non-finite"));
    }
}
