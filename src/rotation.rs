//! In-plane tilt estimation and correction.
//!
//! The tilt estimate is coarse: the median absolute slope of
//! the detected segments, scaled into degrees by a fixed empirical factor.
//! Vertical segments have no slope and are skipped. Because only the
//! magnitude of the slope is used, the correction always rotates the frame
//! clockwise; boards tilted the other way are not straightened.
//!
//! Rotation follows the usual image convention: positive angles turn the
//! content counter-clockwise on screen about the frame centre
//! `(width / 2, height / 2)`. Output keeps the input size; uncovered corners
//! are filled with black.
use crate::image::Frame;
use crate::segments::LineSegment;
use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Empirical factor turning a median slope into degrees.
pub const DEFAULT_SLOPE_SCALE: f64 = 55.0;

/// Result of [`RotationEstimator::estimate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationEstimate {
    /// Estimated tilt in degrees, zero when no slope was available.
    pub angle_deg: f64,
    /// Median of the absolute slopes, if any segment had one.
    pub median_slope: Option<f64>,
    pub segments: usize,
    pub slopes_used: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationEstimator {
    pub slope_scale: f64,
}

impl Default for RotationEstimator {
    fn default() -> Self {
        Self {
            slope_scale: DEFAULT_SLOPE_SCALE,
        }
    }
}

impl RotationEstimator {
    pub fn new(slope_scale: f64) -> Self {
        Self { slope_scale }
    }

    pub fn estimate(&self, segments: &[LineSegment]) -> RotationEstimate {
        let mut slopes: Vec<f64> = segments.iter().filter_map(LineSegment::abs_slope).collect();
        let median_slope = median(&mut slopes);
        let angle_deg = median_slope.map_or(0.0, |m| m * self.slope_scale);
        debug!(
            "RotationEstimator::estimate segments={} slopes={} angle_deg={:.3}",
            segments.len(),
            slopes.len(),
            angle_deg
        );
        RotationEstimate {
            angle_deg,
            median_slope,
            segments: segments.len(),
            slopes_used: slopes.len(),
        }
    }

    /// Undo an estimated tilt of `angle_deg` degrees.
    pub fn derotate(&self, frame: &Frame, angle_deg: f64) -> Frame {
        rotate_frame(frame, -angle_deg)
    }
}

/// Median of `values`, averaging the two middle elements for even counts.
/// Sorts in place. `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some(0.5 * (values[mid - 1] + values[mid]))
    }
}

/// Forward affine map of a rotation by `angle_deg` about `(cx, cy)`.
pub fn rotation_matrix(angle_deg: f64, cx: f64, cy: f64) -> Matrix3<f64> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Matrix3::new(
        cos,
        sin,
        (1.0 - cos) * cx - sin * cy,
        -sin,
        cos,
        sin * cx + (1.0 - cos) * cy,
        0.0,
        0.0,
        1.0,
    )
}

/// Rotate `frame` by `angle_deg` about its centre with bilinear sampling.
/// A zero angle returns an identical copy.
pub fn rotate_frame(frame: &Frame, angle_deg: f64) -> Frame {
    if angle_deg == 0.0 {
        return frame.clone();
    }
    let (w, h) = (frame.width(), frame.height());
    let forward = rotation_matrix(angle_deg, w as f64 / 2.0, h as f64 / 2.0);
    let Some(inverse) = forward.try_inverse() else {
        return frame.clone();
    };
    let mut out = frame.clone();
    for y in 0..h {
        for x in 0..w {
            let src = inverse * Vector3::new(x as f64, y as f64, 1.0);
            out.put_pixel(x, y, sample_bilinear(frame, src[0], src[1]));
        }
    }
    out
}

/// Bilinear sample with a black constant border.
fn sample_bilinear(frame: &Frame, sx: f64, sy: f64) -> [u8; 3] {
    let (w, h) = (frame.width() as i64, frame.height() as i64);
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);
    if x0 < -1 || y0 < -1 || x0 >= w || y0 >= h {
        return [0; 3];
    }
    let mut acc = [0.0f64; 3];
    for (dy, wy) in [(0, 1.0 - fy), (1, fy)] {
        for (dx, wx) in [(0, 1.0 - fx), (1, fx)] {
            let (xx, yy) = (x0 + dx, y0 + dy);
            if xx < 0 || yy < 0 || xx >= w || yy >= h {
                continue;
            }
            let px = frame.pixel(xx as usize, yy as usize);
            for c in 0..3 {
                acc[c] += wx * wy * px[c] as f64;
            }
        }
    }
    acc.map(|v| v.round().clamp(0.0, 255.0) as u8)
}
