//! Owned 8-bit grayscale buffer (stride == width).
use super::{ImageU8, ImageView, ImageViewMut};
use crate::error::FretboardError;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer from raw row-major bytes.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FretboardError> {
        if width == 0 || height == 0 {
            return Err(FretboardError::invalid_input(format!(
                "grayscale image has zero area ({width}x{height})"
            )));
        }
        if data.len() != width * height {
            return Err(FretboardError::invalid_input(format!(
                "grayscale buffer holds {} bytes, expected {}",
                data.len(),
                width * height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Zero-filled buffer. Shapes are checked by the caller.
    pub(crate) fn zeroed(width: usize, height: usize) -> Self {
        Self::from_parts(width, height, vec![0; width * height])
    }

    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.width
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }
}
