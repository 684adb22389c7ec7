//! Edge extraction: directional gradients binarized into edge masks.
//!
//! - [`grad`]: saturated Sobel derivative along rows or columns, aperture 3
//!   (strings) or 5 (frets).
//! - [`mask`]: binary [`EdgeMask`] built from a response map by thresholding.
//! - [`morph`]: vertical closing used to bridge fret edges cut by strings.
//!
//! Every call allocates a fresh mask; no stage binarizes a buffer another
//! stage still reads.

pub mod grad;
pub mod mask;
pub mod morph;

pub use grad::{directional_sobel, GradientAxis, SobelAperture};
pub use mask::{EdgeMask, EDGE_ON};
pub use morph::close_vertical;

use crate::error::FretboardError;
use crate::image::ImageU8;

/// Gradient + threshold configuration for one edge pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeExtractor {
    pub axis: GradientAxis,
    pub aperture: SobelAperture,
    /// Responses strictly above this value are marked as edges.
    pub threshold: u8,
}

impl EdgeExtractor {
    pub fn new(axis: GradientAxis, aperture: SobelAperture, threshold: u8) -> Self {
        Self {
            axis,
            aperture,
            threshold,
        }
    }

    /// Compute the directional response of `gray` and binarize it.
    ///
    /// Fails with [`FretboardError::InvalidInput`] for empty or zero-area views.
    pub fn extract(&self, gray: &ImageU8<'_>) -> Result<EdgeMask, FretboardError> {
        let response = directional_sobel(gray, self.axis, self.aperture)?;
        Ok(EdgeMask::from_response(&response, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImageU8;

    #[test]
    fn extractor_marks_leading_edge_of_bright_rows() {
        let (w, h) = (40, 30);
        let data = (0..h)
            .flat_map(|y| std::iter::repeat(if y == 12 { 200u8 } else { 20 }).take(w))
            .collect();
        let gray = GrayImageU8::from_raw(w, h, data).unwrap();
        let mask = EdgeExtractor::new(GradientAxis::Rows, SobelAperture::Three, 100)
            .extract(&gray.as_view())
            .unwrap();
        assert_eq!(mask.count_set(), w);
        assert!((0..w).all(|x| mask.is_set(x, 11)));
    }

    #[test]
    fn flat_image_has_no_edges() {
        let gray = GrayImageU8::from_raw(16, 16, vec![77; 256]).unwrap();
        let mask = EdgeExtractor::new(GradientAxis::Cols, SobelAperture::Five, 100)
            .extract(&gray.as_view())
            .unwrap();
        assert_eq!(mask.count_set(), 0);
    }
}
