//! Binary edge masks.
use crate::error::FretboardError;
use crate::image::{GrayImageU8, ImageView};

/// Marker value of set mask pixels.
pub const EDGE_ON: u8 = 255;

/// Binary buffer with the dimensions of its source view. Pixels are either
/// `0` or [`EDGE_ON`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMask {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

impl EdgeMask {
    /// Binarize a response map: values above `threshold` become [`EDGE_ON`],
    /// values at or below become zero. The response is left untouched.
    pub fn from_response(response: &GrayImageU8, threshold: u8) -> Self {
        let data = response
            .data()
            .iter()
            .map(|&v| if v > threshold { EDGE_ON } else { 0 })
            .collect();
        Self {
            w: response.width(),
            h: response.height(),
            data,
        }
    }

    /// Build a mask from a predicate, e.g. for synthetic inputs.
    pub fn from_fn(
        w: usize,
        h: usize,
        f: impl Fn(usize, usize) -> bool,
    ) -> Result<Self, FretboardError> {
        if w == 0 || h == 0 {
            return Err(FretboardError::invalid_input(format!(
                "edge mask has zero area ({w}x{h})"
            )));
        }
        let data = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| if f(x, y) { EDGE_ON } else { 0 })
            .collect();
        Ok(Self { w, h, data })
    }

    pub(crate) fn from_parts(w: usize, h: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), w * h);
        Self { w, h, data }
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy into an owned gray buffer, e.g. for dumping to disk.
    pub fn to_gray(&self) -> GrayImageU8 {
        GrayImageU8::from_parts(self.w, self.h, self.data.clone())
    }
}

impl ImageView for EdgeMask {
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
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_value_itself_maps_to_zero() {
        let response = GrayImageU8::from_raw(4, 1, vec![99, 100, 101, 255]).unwrap();
        let mask = EdgeMask::from_response(&response, 100);
        assert_eq!(mask.data(), &[0, 0, EDGE_ON, EDGE_ON]);
        assert_eq!(mask.count_set(), 2);
        // Source stays intact.
        assert_eq!(response.data(), &[99, 100, 101, 255]);
    }
}
