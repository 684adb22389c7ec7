//! Parameter types configuring the detector stages.
//!
//! [`FretboardParams`] is the single record passed to the detector. Every
//! group deserializes from JSON with missing fields taken from the defaults,
//! except [`AxisParams`], whose defaults differ between strings and frets
//! and which must therefore be given in full when overridden.

use crate::edges::{EdgeExtractor, GradientAxis, SobelAperture};
use crate::grid::{GridAxis, GridClusterer};
use crate::rotation::DEFAULT_SLOPE_SCALE;
use crate::segments::{HoughOptions, LineDetector};
use serde::{Deserialize, Serialize};

/// Detector-wide parameters controlling the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FretboardParams {
    /// Tilt estimation pass on the raw frame.
    pub rotation: RotationParams,
    /// String (horizontal) isolation pass on the derotated frame.
    pub strings: AxisParams,
    /// Fret (vertical) isolation pass on the derotated frame.
    pub frets: AxisParams,
    /// Accumulator votes needed before a Hough line is traced.
    pub hough_votes: u32,
    /// Seed of the Hough pixel visiting order.
    pub seed: u64,
    pub envelope: EnvelopeParams,
    pub bridge: BridgeParams,
}

impl Default for FretboardParams {
    fn default() -> Self {
        Self {
            rotation: RotationParams::default(),
            strings: AxisParams::strings(),
            frets: AxisParams::frets(),
            hough_votes: 20,
            seed: 0,
            envelope: EnvelopeParams::default(),
            bridge: BridgeParams::default(),
        }
    }
}

impl FretboardParams {
    pub fn rotation_detector(&self) -> LineDetector {
        LineDetector::new(
            HoughOptions {
                vote_threshold: self.hough_votes,
                min_line_length: self.rotation.min_line_length,
                max_line_gap: self.rotation.max_line_gap,
            },
            self.seed,
        )
    }

    pub fn axis_detector(&self, axis: &AxisParams) -> LineDetector {
        LineDetector::new(
            HoughOptions {
                vote_threshold: self.hough_votes,
                min_line_length: axis.min_line_length,
                max_line_gap: axis.max_line_gap,
            },
            self.seed,
        )
    }
}

/// Tilt estimation: string edges on the raw frame, a permissive Hough pass
/// and the slope-to-degrees factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationParams {
    pub edge_threshold: u8,
    pub min_line_length: u32,
    pub max_line_gap: u32,
    pub slope_scale: f64,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            edge_threshold: 150,
            min_line_length: 30,
            max_line_gap: 50,
            slope_scale: DEFAULT_SLOPE_SCALE,
        }
    }
}

impl RotationParams {
    pub fn edge_extractor(&self) -> EdgeExtractor {
        EdgeExtractor::new(GradientAxis::Rows, SobelAperture::Three, self.edge_threshold)
    }
}

/// One isolation pass: edge extraction, optional closing, Hough and gap scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisParams {
    pub edge_threshold: u8,
    pub aperture: SobelAperture,
    /// Height of the vertical closing element; values below 2 disable it.
    pub closing_kernel_height: usize,
    pub min_line_length: u32,
    pub max_line_gap: u32,
    /// Maximum off-axis extent (`|dy|` for strings, `|dx|` for frets), exclusive.
    pub straightness: i32,
    /// Largest gap between neighbouring coordinates still counted as a run, exclusive.
    pub gap_threshold: i32,
    /// Leading coordinate indices that can never become the first bound.
    pub skip: usize,
}

impl AxisParams {
    pub fn strings() -> Self {
        Self {
            edge_threshold: 100,
            aperture: SobelAperture::Three,
            closing_kernel_height: 0,
            min_line_length: 50,
            max_line_gap: 50,
            straightness: 10,
            gap_threshold: 6,
            skip: 3,
        }
    }

    pub fn frets() -> Self {
        Self {
            edge_threshold: 100,
            aperture: SobelAperture::Five,
            closing_kernel_height: 4,
            min_line_length: 50,
            max_line_gap: 50,
            straightness: 5,
            gap_threshold: 10,
            skip: 2,
        }
    }

    pub fn edge_extractor(&self, axis: GradientAxis) -> EdgeExtractor {
        EdgeExtractor::new(axis, self.aperture, self.edge_threshold)
    }

    pub fn clusterer(&self, axis: GridAxis) -> GridClusterer {
        GridClusterer {
            axis,
            straightness: self.straightness,
            gap_threshold: self.gap_threshold,
            skip: self.skip,
        }
    }
}

/// Expected fretboard size and the absolute limits on the grid box.
///
/// A box passes when each dimension is within `tolerance` of the expected
/// value and strictly inside the absolute bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeParams {
    pub expected_width: usize,
    pub expected_height: usize,
    pub tolerance: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,
    /// Margin added around the box before cropping.
    pub padding: usize,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            expected_width: 600,
            expected_height: 100,
            tolerance: 40,
            min_width: 500,
            max_width: 650,
            min_height: 90,
            max_height: 120,
            padding: 15,
        }
    }
}

/// Bright-strip test on the trailing edge of the crop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeParams {
    pub strip_width: usize,
    /// Luma values above this count as bright.
    pub luma_threshold: u8,
    /// The bridge is present when strictly more pixels are bright.
    pub min_bright_pixels: usize,
}

impl Default for BridgeParams {
    fn default() -> Self {
        Self {
            strip_width: 20,
            luma_threshold: 127,
            min_bright_pixels: 1300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let params: FretboardParams =
            serde_json::from_str(r#"{ "hough_votes": 25, "envelope": { "padding": 5 } }"#).unwrap();
        assert_eq!(params.hough_votes, 25);
        assert_eq!(params.envelope.padding, 5);
        assert_eq!(params.envelope.max_width, 650);
        assert_eq!(params.frets, AxisParams::frets());
        assert_eq!(params.rotation, RotationParams::default());
    }

    #[test]
    fn detectors_share_vote_threshold_and_seed() {
        let params = FretboardParams {
            hough_votes: 33,
            seed: 9,
            ..FretboardParams::default()
        };
        let rot = params.rotation_detector();
        assert_eq!(rot.options.vote_threshold, 33);
        assert_eq!(rot.options.min_line_length, 30);
        let frets = params.axis_detector(&params.frets);
        assert_eq!(frets.seed, 9);
        assert_eq!(frets.options.min_line_length, 50);
    }

    #[test]
    fn aperture_serializes_as_integer() {
        let json = serde_json::to_value(AxisParams::frets()).unwrap();
        assert_eq!(json["aperture"], 5);
    }
}
