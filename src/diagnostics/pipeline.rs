use crate::diagnostics::TimingBreakdown;
use crate::grid::{AxisExtent, GridAxis};
use crate::rotation::RotationEstimate;
use crate::types::{BoundingBox, FretboardCandidate, PixelBox, RejectReason};
use serde::Serialize;

/// Result produced by
/// [`FretboardDetector::detect_with_report`](crate::FretboardDetector::detect_with_report).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    /// `None` when a stage short-circuited before a box could be formed.
    pub candidate: Option<FretboardCandidate>,
    pub trace: PipelineTrace,
}

impl DetectionReport {
    pub fn is_accepted(&self) -> bool {
        self.candidate
            .as_ref()
            .is_some_and(FretboardCandidate::is_accepted)
    }

    /// Reason the frame produced no fretboard, if it did not.
    pub fn rejection(&self) -> Option<&RejectReason> {
        self.trace.rejection.as_ref()
    }
}

/// Everything the detector computed for one frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub rotation: RotationStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<AxisStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frets: Option<AxisStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<PixelBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_pixels: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectReason>,
    pub timings: TimingBreakdown,
}

impl PipelineTrace {
    pub(crate) fn new(input: InputDescriptor, rotation: RotationStage) -> Self {
        Self {
            input,
            rotation,
            strings: None,
            frets: None,
            bbox: None,
            region: None,
            bridge_pixels: None,
            rejection: None,
            timings: TimingBreakdown::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Tilt estimation pass on the raw frame.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationStage {
    pub edge_pixels: usize,
    pub estimate: RotationEstimate,
    /// Degrees the frame was rotated by; the negated estimate.
    pub applied_deg: f64,
}

/// One isolation pass after derotation.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStage {
    pub axis: GridAxis,
    pub edge_pixels: usize,
    pub segments: usize,
    /// Segments close enough to the axis to contribute coordinates.
    pub kept: usize,
    pub extent: AxisExtent,
}
