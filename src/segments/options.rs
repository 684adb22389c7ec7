use serde::{Deserialize, Serialize};

/// Parameters of the probabilistic Hough transform.
///
/// Resolution is fixed at one pixel in distance and one degree in angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoughOptions {
    /// Minimum accumulator votes before a line is traced.
    pub vote_threshold: u32,
    /// Minimum extent, along x or along y, of an accepted segment.
    pub min_line_length: u32,
    /// Largest run of unset pixels bridged while tracing.
    pub max_line_gap: u32,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            vote_threshold: 20,
            min_line_length: 50,
            max_line_gap: 50,
        }
    }
}
