use super::{Point, RawSample, Trajectory};
use crate::error::{Error, Result};

/// Half a turn, in degrees. Steps strictly larger than this are treated as wraparound.
const HALF_TURN: f64 = 180.0;
const FULL_TURN: f64 = 360.0;

/// Unwrap an angular signal given in degrees.
///
/// Walks the sequence keeping a running offset in multiples of 360°. When the
/// step from the previous unwrapped value exceeds +180° the offset drops by
/// 360°; below −180° it rises by 360°. A step of exactly ±180° is left alone.
///
/// ```rust
/// use aimtrace::trajectory::unwrap_degrees;
///
/// assert_eq!(unwrap_degrees(&[170.0, -170.0, 170.0]), vec![170.0, 190.0, 170.0]);
/// ```
pub fn unwrap_degrees(angles: &[f64]) -> Vec<f64> {
    let Some((&first, rest)) = angles.split_first() else {
        return Vec::new();
    };

    let mut unwrapped = Vec::with_capacity(angles.len());
    unwrapped.push(first);
    let mut prev = first;
    let mut offset = 0.0;
    for &curr in rest {
        let diff = curr + offset - prev;
        if diff > HALF_TURN {
            offset -= FULL_TURN;
        } else if diff < -HALF_TURN {
            offset += FULL_TURN;
        }
        prev = curr + offset;
        unwrapped.push(prev);
    }
    unwrapped
}

/// Normalize raw samples into a comparable trajectory.
///
/// Non-finite samples are discarded up front. The angular axis is unwrapped,
/// both axes are shifted so the first sample sits at the origin, each axis is
/// mirrored on its own if its final displacement is negative, and points left
/// outside the non-negative quadrant are dropped (order is kept).
///
/// Returns [`Error::InsufficientData`] when fewer than two samples remain at
/// either the input or the output stage.
pub fn normalize(samples: &[RawSample]) -> Result<Trajectory> {
    let valid: Vec<&RawSample> = samples.iter().filter(|s| s.is_finite()).collect();
    if valid.len() < 2 {
        return Err(Error::InsufficientData { found: valid.len() });
    }

    let positions: Vec<f64> = valid.iter().map(|s| s.position).collect();
    let angles: Vec<f64> = valid.iter().map(|s| s.angle).collect();
    let angles = unwrap_degrees(&angles);

    let mut dx = zero_at_origin(&positions);
    let mut dy = zero_at_origin(&angles);
    flip_if_negative(&mut dx);
    flip_if_negative(&mut dy);

    let points: Vec<Point> = dx
        .into_iter()
        .zip(dy)
        .filter(|&(x, y)| x >= 0.0 && y >= 0.0)
        .map(|(x, y)| [x, y])
        .collect();

    Trajectory::new(points)
}

fn zero_at_origin(values: &[f64]) -> Vec<f64> {
    let origin = values[0];
    values.iter().map(|v| v - origin).collect()
}

/// Negate the whole axis when it ends below zero.
fn flip_if_negative(axis: &mut [f64]) {
    if axis.last().is_some_and(|&v| v < 0.0) {
        for v in axis.iter_mut() {
            *v = -*v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(pairs: &[(f64, f64)]) -> Vec<RawSample> {
        pairs.iter().copied().map(RawSample::from).collect()
    }

    #[test]
    fn unwrap_empty_and_single() {
        assert!(unwrap_degrees(&[]).is_empty());
        assert_eq!(unwrap_degrees(&[42.0]), vec![42.0]);
    }

    #[test]
    fn unwrap_corrects_wraparound() {
        assert_eq!(
            unwrap_degrees(&[170.0, -170.0, 170.0]),
            vec![170.0, 190.0, 170.0]
        );
        assert_eq!(
            unwrap_degrees(&[-170.0, 170.0, -170.0]),
            vec![-170.0, -190.0, -170.0]
        );
    }

    #[test]
    fn unwrap_accumulates_full_turns() {
        let angles = [0.0, 120.0, -120.0, 0.0, 120.0, -120.0, 0.0];
        let out = unwrap_degrees(&angles);
        assert_eq!(out, vec![0.0, 120.0, 240.0, 360.0, 480.0, 600.0, 720.0]);
    }

    #[test]
    fn unwrap_exact_half_turn_is_not_corrected() {
        assert_eq!(unwrap_degrees(&[0.0, 180.0]), vec![0.0, 180.0]);
        assert_eq!(unwrap_degrees(&[0.0, -180.0]), vec![0.0, -180.0]);
    }

    #[test]
    fn unwrap_constant_is_unchanged() {
        let angles = vec![-35.5; 8];
        assert_eq!(unwrap_degrees(&angles), angles);
    }

    #[test]
    fn normalize_starts_at_origin() {
        let traj = normalize(&samples(&[(5.0, 10.0), (6.0, 12.0), (8.0, 15.0)])).unwrap();
        assert_eq!(traj.points(), &[[0.0, 0.0], [1.0, 2.0], [3.0, 5.0]]);
    }

    #[test]
    fn normalize_flips_axes_independently() {
        // x ends negative, y ends positive: only x is mirrored.
        let traj = normalize(&samples(&[(0.0, 0.0), (-1.0, 1.0), (-2.0, 3.0)])).unwrap();
        assert_eq!(traj.points(), &[[0.0, 0.0], [1.0, 1.0], [2.0, 3.0]]);

        // both end negative: both mirrored.
        let traj = normalize(&samples(&[(0.0, 0.0), (-1.0, -1.0), (-2.0, -3.0)])).unwrap();
        assert_eq!(traj.last(), [2.0, 3.0]);
    }

    #[test]
    fn normalize_drops_overshoot_points() {
        // y dips below zero before climbing; that sample is dropped, order kept.
        let traj = normalize(&samples(&[
            (0.0, 0.0),
            (1.0, -2.0),
            (2.0, 1.0),
            (3.0, 4.0),
        ]))
        .unwrap();
        assert_eq!(traj.points(), &[[0.0, 0.0], [2.0, 1.0], [3.0, 4.0]]);
    }

    #[test]
    fn normalize_unwraps_before_zeroing() {
        let traj = normalize(&samples(&[(0.0, 175.0), (1.0, -175.0), (2.0, -165.0)])).unwrap();
        let last = traj.last();
        assert_relative_eq!(last[0], 2.0);
        assert_relative_eq!(last[1], 20.0);
    }

    #[test]
    fn normalize_skips_non_finite_samples() {
        let traj = normalize(&samples(&[
            (0.0, 0.0),
            (f64::NAN, 1.0),
            (1.0, 1.0),
            (2.0, f64::INFINITY),
        ]))
        .unwrap();
        assert_eq!(traj.points(), &[[0.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn normalize_single_sample_is_insufficient() {
        let result = normalize(&samples(&[(3.0, 4.0)]));
        assert!(matches!(result, Err(Error::InsufficientData { found: 1 })));
    }

    #[test]
    fn normalize_keeps_flipped_origin() {
        // Negating the origin yields -0.0, which still passes the filter.
        let traj = normalize(&samples(&[(4.0, 4.0), (3.0, 3.0)])).unwrap();
        assert_eq!(traj.points(), &[[0.0, 0.0], [1.0, 1.0]]);
    }
}
