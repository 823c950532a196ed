//! Symmetric pairwise distance matrices.

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use super::frechet::discrete_frechet;
use crate::error::{Error, Result};
use crate::trajectory::Trajectory;

/// N×N symmetric, zero-diagonal matrix of finite non-negative distances.
///
/// Stored flat in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build from the strict upper triangle in row-major order
    /// (`(0,1), (0,2), ..., (1,2), ...`), mirroring every value.
    pub(crate) fn from_upper(n: usize, upper: &[f64]) -> Self {
        debug_assert_eq!(upper.len(), n * n.saturating_sub(1) / 2);
        let mut data = vec![0.0f64; n * n];
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                data[i * n + j] = upper[k];
                data[j * n + i] = upper[k];
                k += 1;
            }
        }
        Self { n, data }
    }

    /// Build from square rows, checking shape, symmetry, the zero diagonal and
    /// that every entry is finite and non-negative.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        for row in rows {
            if row.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: row.len(),
                });
            }
        }

        for i in 0..n {
            if rows[i][i] != 0.0 {
                return Err(Error::MalformedMatrix(format!(
                    "diagonal entry ({i}, {i}) is {}",
                    rows[i][i]
                )));
            }
            for j in (i + 1)..n {
                let v = rows[i][j];
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::MalformedMatrix(format!(
                        "entry ({i}, {j}) is {v}"
                    )));
                }
                if v != rows[j][i] {
                    return Err(Error::MalformedMatrix(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ"
                    )));
                }
            }
        }

        Ok(Self {
            n,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    /// Number of items (rows).
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between items `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Flat row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Strict upper triangle in row-major order (`squareform` layout).
    pub fn condensed(&self) -> Vec<f64> {
        let n = self.n;
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            out.extend_from_slice(&self.row(i)[i + 1..]);
        }
        out
    }
}

/// Computes the Fréchet distance matrix over a set of trajectories.
#[derive(Clone, Debug)]
pub struct DistanceMatrixBuilder {
    parallel: bool,
}

impl DistanceMatrixBuilder {
    /// Create a builder. Pairs are evaluated in parallel by default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate pairs on the rayon pool (`true`) or on the calling thread.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Compute every pairwise distance.
    ///
    /// Fails with [`Error::InsufficientTrajectories`] for fewer than two inputs.
    /// Any pair failure aborts the build; no partial matrix is produced.
    pub fn build(&self, trajectories: &[Trajectory]) -> Result<DistanceMatrix> {
        let n = trajectories.len();
        if n < 2 {
            return Err(Error::InsufficientTrajectories { found: n });
        }

        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        info!(
            "computing {} frechet distances over {n} trajectories (parallel: {})",
            pairs.len(),
            self.parallel
        );

        let pair_distance = |&(i, j): &(usize, usize)| {
            discrete_frechet(trajectories[i].points(), trajectories[j].points()).map_err(|err| {
                match err {
                    Error::NumericAnomaly { context } => {
                        Error::numeric_anomaly(format!("pair ({i}, {j}): {context}"))
                    }
                    other => other,
                }
            })
        };

        let upper: Vec<f64> = if self.parallel {
            pairs.par_iter().map(pair_distance).collect::<Result<_>>()?
        } else {
            pairs.iter().map(pair_distance).collect::<Result<_>>()?
        };

        let matrix = DistanceMatrix::from_upper(n, &upper);
        debug!(
            "distance matrix ready: max = {:.6}",
            upper.iter().copied().fold(0.0f64, f64::max)
        );
        Ok(matrix)
    }
}

impl Default for DistanceMatrixBuilder {
    fn default() -> Self {
        Self { parallel: true }
    }
}
