//! Owned 8-bit RGB camera frame.
//!
//! Frames are only built through the checked factories below, so every
//! `Frame` in the pipeline has a non-zero area and a buffer of exactly
//! `width * height * 3` bytes.
use super::GrayImageU8;
use crate::error::FretboardError;
use crate::types::PixelRect;

/// Fixed-point BT.601 luma weights (sum to `1 << 14`).
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    pub const CHANNELS: usize = 3;

    /// Wrap interleaved RGB bytes in row-major order.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FretboardError> {
        if width == 0 || height == 0 {
            return Err(FretboardError::invalid_input(format!(
                "frame has zero area ({width}x{height})"
            )));
        }
        let expected = width * height * Self::CHANNELS;
        if data.len() != expected {
            return Err(FretboardError::invalid_input(format!(
                "frame buffer holds {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame of a single colour.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self, FretboardError> {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width * height * Self::CHANNELS)
            .collect();
        Self::from_raw(width, height, data)
    }

    pub fn from_rgb_image(img: ::image::RgbImage) -> Result<Self, FretboardError> {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::from_raw(width, height, img.into_raw())
    }

    pub fn to_rgb_image(&self) -> ::image::RgbImage {
        // Shape is guaranteed by the constructors.
        ::image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            ::image::Rgb(self.pixel(x as usize, y as usize))
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * Self::CHANNELS;
        self.data[i..i + Self::CHANNELS].copy_from_slice(&rgb);
    }

    /// Derive the single-channel luma view used by the edge stages.
    pub fn to_gray(&self) -> GrayImageU8 {
        let data = self
            .data
            .chunks_exact(Self::CHANNELS)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        GrayImageU8::from_parts(self.width, self.height, data)
    }

    /// Copy out `rect`, clamped to the frame. Fails when nothing is left
    /// after clamping.
    pub fn crop(&self, rect: &PixelRect) -> Result<Frame, FretboardError> {
        let x0 = rect.x.min(self.width);
        let y0 = rect.y.min(self.height);
        let x1 = (rect.x + rect.width).min(self.width);
        let y1 = (rect.y + rect.height).min(self.height);
        if x1 <= x0 || y1 <= y0 {
            return Err(FretboardError::invalid_input(format!(
                "crop {rect:?} lies outside the {}x{} frame",
                self.width, self.height
            )));
        }
        let out_w = x1 - x0;
        let mut data = Vec::with_capacity(out_w * (y1 - y0) * Self::CHANNELS);
        for y in y0..y1 {
            let start = (y * self.width + x0) * Self::CHANNELS;
            data.extend_from_slice(&self.data[start..start + out_w * Self::CHANNELS]);
        }
        Frame::from_raw(out_w, y1 - y0, data)
    }
}

#[inline]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + (1 << (LUMA_SHIFT - 1));
    (y >> LUMA_SHIFT) as u8
}
