//! Trajectory distances.
//!
//! Shapes are compared with the discrete Fréchet distance, which respects the
//! order in which each trace was drawn: two traces covering the same ground in
//! opposite directions are far apart.
//!
//! [`DistanceMatrixBuilder`] evaluates every unordered pair of a trajectory
//! set. Pairs are independent, so the builder hands them to rayon by default.
//!
//! ```rust
//! use aimtrace::distance::DistanceMatrixBuilder;
//! use aimtrace::Trajectory;
//!
//! let trajs = vec![
//!     Trajectory::new(vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).unwrap(),
//!     Trajectory::new(vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).unwrap(),
//! ];
//! let m = DistanceMatrixBuilder::new().build(&trajs).unwrap();
//! assert_eq!(m.get(0, 1), 0.0);
//! ```

mod frechet;
mod matrix;

pub use frechet::{discrete_frechet, CouplingTable};
pub use matrix::{DistanceMatrix, DistanceMatrixBuilder};
