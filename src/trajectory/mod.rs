//! Trajectories and the raw samples they are built from.
//!
//! A recorded trace arrives as an ordered list of [`RawSample`]s: a spatial
//! value and an angular value in degrees. [`normalize`] turns that into a
//! [`Trajectory`] whose shape can be compared with any other trace:
//!
//! 1. unwrap the angular axis so there are no ±360° jumps
//! 2. translate so the trace starts at the origin
//! 3. mirror each axis whose final displacement is negative
//! 4. drop points that still fall outside the non-negative quadrant
//!
//! ```rust
//! use aimtrace::trajectory::{normalize, RawSample};
//!
//! let samples = vec![
//!     RawSample::new(10.0, 170.0),
//!     RawSample::new(9.0, -170.0),
//!     RawSample::new(8.0, -160.0),
//! ];
//! let traj = normalize(&samples).unwrap();
//! assert_eq!(traj.first(), [0.0, 0.0]);
//! assert_eq!(traj.last(), [2.0, 30.0]);
//! ```

mod normalize;
mod records;

pub use normalize::{normalize, unwrap_degrees};
pub use records::{read_samples, read_samples_path};

use serde::Serialize;

use crate::error::{Error, Result};

/// A 2-D point `[x, y]`.
pub type Point = [f64; 2];

/// One raw observation: a spatial value and an angular value in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawSample {
    /// Spatial coordinate (value₁).
    pub position: f64,
    /// Angular coordinate in degrees, possibly wrapped at ±180 (value₂).
    pub angle: f64,
}

impl RawSample {
    /// Create a sample from its spatial and angular values.
    pub fn new(position: f64, angle: f64) -> Self {
        Self { position, angle }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.angle.is_finite()
    }
}

impl From<(f64, f64)> for RawSample {
    fn from((position, angle): (f64, f64)) -> Self {
        Self::new(position, angle)
    }
}

/// An ordered sequence of at least two finite 2-D points.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    /// Build a trajectory from points.
    ///
    /// Fails with [`Error::InsufficientData`] for fewer than two points and
    /// [`Error::InvalidParameter`] if any coordinate is not finite.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InsufficientData {
                found: points.len(),
            });
        }
        if points.iter().flatten().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "points",
                message: "coordinates must be finite",
            });
        }
        Ok(Self { points })
    }

    /// The points, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points (always at least 2).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Starting point; `[0, 0]` after normalization.
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Final point.
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

impl AsRef<[Point]> for Trajectory {
    fn as_ref(&self) -> &[Point] {
        &self.points
    }
}
