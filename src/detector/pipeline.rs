//! Detector pipeline driving fretboard detection end-to-end.
//!
//! The [`FretboardDetector`] takes one RGB frame and returns either an
//! accepted [`FretboardCandidate`] or nothing. Internally it
//!
//! 1. estimates the in-plane tilt from string edges on the raw frame and
//!    rotates the frame back,
//! 2. runs the string pass (row derivative, Hough, horizontal gap scan) and
//!    the fret pass (column derivative, vertical closing, Hough, vertical gap
//!    scan) on the derotated frame, in parallel,
//! 3. combines both extents into a [`BoundingBox`] and hands it to the
//!    [`DimensionValidator`] for the size and bridge checks.
//!
//! Typical usage:
//! ```no_run
//! use fretboard_detector::{FretboardDetector, FretboardParams};
//! use fretboard_detector::image::Frame;
//!
//! # fn example(frame: Frame) -> Result<(), fretboard_detector::FretboardError> {
//! let detector = FretboardDetector::new(FretboardParams::default());
//! if let Some(candidate) = detector.detect(&frame)? {
//!     println!("fretboard at {:?}", candidate.region);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::{AxisParams, FretboardParams};
use crate::bridge::BridgeDetector;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{AxisStage, DetectionReport, InputDescriptor, PipelineTrace, RotationStage};
use crate::edges::{close_vertical, GradientAxis};
use crate::error::FretboardError;
use crate::grid::GridAxis;
use crate::image::{Frame, ImageU8};
use crate::rotation::RotationEstimator;
use crate::types::{BoundingBox, FretboardCandidate, RejectReason};
use crate::validate::DimensionValidator;
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

/// Stateless fretboard detector. A single instance can serve many frames,
/// also from several threads at once.
#[derive(Clone, Debug)]
pub struct FretboardDetector {
    params: FretboardParams,
    validator: DimensionValidator,
}

impl Default for FretboardDetector {
    fn default() -> Self {
        Self::new(FretboardParams::default())
    }
}

impl FretboardDetector {
    pub fn new(params: FretboardParams) -> Self {
        let validator = DimensionValidator::new(
            params.envelope.clone(),
            BridgeDetector::new(params.bridge.clone()),
        );
        Self { params, validator }
    }

    pub fn params(&self) -> &FretboardParams {
        &self.params
    }

    /// Detect the fretboard in `frame`. `Ok(None)` means no fretboard was
    /// found this frame; errors are reserved for malformed input.
    pub fn detect(&self, frame: &Frame) -> Result<Option<FretboardCandidate>, FretboardError> {
        let report = self.detect_with_report(frame)?;
        Ok(report.candidate.filter(FretboardCandidate::is_accepted))
    }

    /// Run [`detect`](Self::detect) over `frames` in parallel. Results keep
    /// the input order.
    pub fn detect_batch(
        &self,
        frames: &[Frame],
    ) -> Vec<Result<Option<FretboardCandidate>, FretboardError>> {
        frames.par_iter().map(|frame| self.detect(frame)).collect()
    }

    /// Estimate the tilt of `frame` and return the derotated copy.
    pub fn correct_rotation(&self, frame: &Frame) -> Result<(Frame, RotationStage), FretboardError> {
        let rot = &self.params.rotation;
        let gray = frame.to_gray();
        let mask = rot.edge_extractor().extract(&gray.as_view())?;
        let segments = self.params.rotation_detector().detect(&mask);
        let estimator = RotationEstimator::new(rot.slope_scale);
        let estimate = estimator.estimate(&segments);
        let derotated = estimator.derotate(frame, estimate.angle_deg);
        let stage = RotationStage {
            edge_pixels: mask.count_set(),
            estimate,
            applied_deg: -estimate.angle_deg,
        };
        Ok((derotated, stage))
    }

    /// Run the full pipeline and return the candidate together with a trace
    /// of every stage.
    pub fn detect_with_report(&self, frame: &Frame) -> Result<DetectionReport, FretboardError> {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return Err(FretboardError::invalid_input(format!(
                "frame has zero area ({width}x{height})"
            )));
        }
        debug!("FretboardDetector::detect start w={} h={}", width, height);
        let total_start = Instant::now();

        let rot_start = Instant::now();
        let (derotated, rotation) = self.correct_rotation(frame)?;
        let rotation_ms = elapsed_ms(rot_start);
        debug!(
            "FretboardDetector::detect rotation angle_deg={:.3} slopes={} segments={}",
            rotation.estimate.angle_deg, rotation.estimate.slopes_used, rotation.estimate.segments
        );

        let mut trace = PipelineTrace::new(InputDescriptor { width, height }, rotation);
        trace.timings.push("rotation", rotation_ms);

        let gray_start = Instant::now();
        let gray = derotated.to_gray();
        trace.timings.push_since("grayscale", gray_start);
        let view = gray.as_view();

        let (strings, frets) = rayon::join(
            || self.run_axis(&view, GridAxis::Horizontal, &self.params.strings),
            || self.run_axis(&view, GridAxis::Vertical, &self.params.frets),
        );
        let (strings, strings_ms) = strings?;
        let (frets, frets_ms) = frets?;
        trace.timings.push("strings", strings_ms);
        trace.timings.push("frets", frets_ms);
        trace.strings = Some(strings);
        trace.frets = Some(frets);

        let short_circuit = if strings.segments == 0 {
            Some(RejectReason::NoStringLines)
        } else if frets.segments == 0 {
            Some(RejectReason::NoFretLines)
        } else {
            None
        };
        if let Some(reason) = short_circuit {
            debug!("FretboardDetector::detect short-circuit {:?}", reason);
            trace.rejection = Some(reason);
            trace.timings.total_ms = elapsed_ms(total_start);
            return Ok(DetectionReport {
                candidate: None,
                trace,
            });
        }

        let bbox = BoundingBox {
            first_row: strings.extent.first,
            last_row: strings.extent.last,
            first_col: frets.extent.first,
            last_col: frets.extent.last,
        };
        trace.bbox = Some(bbox);

        let validate_start = Instant::now();
        let candidate = self.validator.evaluate(&derotated, bbox)?;
        trace.timings.push_since("validate", validate_start);
        trace.region = candidate.region;
        trace.bridge_pixels = candidate.bridge_pixels;
        trace.rejection = candidate.reject_reason().cloned();
        trace.timings.total_ms = elapsed_ms(total_start);

        debug!(
            "FretboardDetector::detect done accepted={} region={:?} total_ms={:.3}",
            candidate.is_accepted(),
            candidate.region,
            trace.timings.total_ms
        );
        Ok(DetectionReport {
            candidate: Some(candidate),
            trace,
        })
    }

    fn run_axis(
        &self,
        gray: &ImageU8<'_>,
        axis: GridAxis,
        params: &AxisParams,
    ) -> Result<(AxisStage, f64), FretboardError> {
        let start = Instant::now();
        let gradient_axis = match axis {
            GridAxis::Horizontal => GradientAxis::Rows,
            GridAxis::Vertical => GradientAxis::Cols,
        };
        let mut mask = params.edge_extractor(gradient_axis).extract(gray)?;
        if params.closing_kernel_height > 1 {
            mask = close_vertical(&mask, params.closing_kernel_height);
        }
        let segments = self.params.axis_detector(params).detect(&mask);
        let clusterer = params.clusterer(axis);
        let cluster = clusterer.collect(&segments);
        let extent = cluster.extent(clusterer.gap_threshold, clusterer.skip);
        let stage = AxisStage {
            axis,
            edge_pixels: mask.count_set(),
            segments: segments.len(),
            kept: cluster.len() / 2,
            extent,
        };
        debug!(
            "FretboardDetector::run_axis axis={:?} edges={} segments={} kept={} extent={:?}",
            axis, stage.edge_pixels, stage.segments, stage.kept, stage.extent
        );
        Ok((stage, elapsed_ms(start)))
    }
}
