//! Straight-segment detection on binary edge masks.
//!
//! [`LineDetector`] wraps a progressive probabilistic Hough transform with a
//! fixed resolution of one pixel and one degree. Pixel visiting order is
//! drawn from a seeded generator, so a detector instance is deterministic.
//!
//! Both detection passes of the fretboard pipeline (rotation estimate and
//! grid isolation) use the same detector type with different options.

mod hough;
mod options;
mod segment;

pub use hough::probabilistic_hough;
pub use options::HoughOptions;
pub use segment::LineSegment;

use crate::edges::EdgeMask;

/// Seeded probabilistic Hough line detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineDetector {
    pub options: HoughOptions,
    pub seed: u64,
}

impl LineDetector {
    pub fn new(options: HoughOptions, seed: u64) -> Self {
        Self { options, seed }
    }

    /// Segments supported by at least `vote_threshold` collinear pixels and
    /// spanning at least `min_line_length` along x or y. An empty mask yields
    /// no segments.
    pub fn detect(&self, mask: &EdgeMask) -> Vec<LineSegment> {
        probabilistic_hough(mask, &self.options, self.seed)
    }
}

#[cfg(test)]
mod tests;
