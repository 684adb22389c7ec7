use crate::error::FretboardError;

/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Build a view, rejecting zero-area shapes and buffers too short for
    /// `stride * (h - 1) + w` bytes.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Result<Self, FretboardError> {
        let view = Self { w, h, stride, data };
        view.validate()?;
        Ok(view)
    }

    /// Check the shape invariants of a view built from public fields.
    pub fn validate(&self) -> Result<(), FretboardError> {
        if self.w == 0 || self.h == 0 {
            return Err(FretboardError::invalid_input(format!(
                "grayscale view has zero area ({}x{})",
                self.w, self.h
            )));
        }
        if self.stride < self.w {
            return Err(FretboardError::invalid_input(format!(
                "stride {} is smaller than width {}",
                self.stride, self.w
            )));
        }
        let needed = self.stride * (self.h - 1) + self.w;
        if self.data.len() < needed {
            return Err(FretboardError::invalid_input(format!(
                "grayscale buffer holds {} bytes, {needed} required",
                self.data.len()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
