#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Stage modules, usable on their own for tooling and experiments.
pub mod bridge;
pub mod edges;
pub mod grid;
pub mod rotation;
pub mod segments;
pub mod validate;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{FretboardDetector, FretboardParams};
pub use crate::error::FretboardError;
pub use crate::types::{BoundingBox, FretboardCandidate, RejectReason, Verdict};

// Detailed diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use fretboard_detector::prelude::*;
///
/// # fn main() -> Result<(), FretboardError> {
/// let (w, h) = (640usize, 480usize);
/// let frame = Frame::from_raw(w, h, vec![0u8; w * h * 3])?;
///
/// let det = FretboardDetector::new(FretboardParams::default());
/// let report = det.detect_with_report(&frame)?;
/// println!(
///     "accepted={} angle={:.2} total_ms={:.3}",
///     report.is_accepted(),
///     report.trace.rotation.estimate.angle_deg,
///     report.trace.timings.total_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Frame, ImageU8};
    pub use crate::{FretboardCandidate, FretboardDetector, FretboardError, FretboardParams};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::bridge::{BridgeDetector, BridgeInspection};
    pub use crate::edges::{EdgeExtractor, EdgeMask};
    pub use crate::grid::{AxisExtent, GridAxis, GridClusterer, LineCluster};
    pub use crate::rotation::{RotationEstimate, RotationEstimator};
    pub use crate::segments::{HoughOptions, LineDetector, LineSegment};
    pub use crate::validate::DimensionValidator;

    pub use crate::diagnostics::{
        AxisStage, InputDescriptor, RotationStage, StageTiming, TimingBreakdown,
    };
}
