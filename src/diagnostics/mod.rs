//! Serializable diagnostics returned alongside detection results.
//!
//! [`DetectionReport`] is what
//! [`FretboardDetector::detect_with_report`](crate::FretboardDetector::detect_with_report)
//! returns: the candidate, if any, plus a [`PipelineTrace`] with per-stage
//! counts, extents and timings.

pub mod pipeline;
pub mod timing;

pub use pipeline::{AxisStage, DetectionReport, InputDescriptor, PipelineTrace, RotationStage};
pub use timing::{StageTiming, TimingBreakdown};
