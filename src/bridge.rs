//! Bridge presence test on a fretboard crop.
//!
//! A correctly framed crop ends in the bright bridge hardware. The test
//! converts the crop to luma, looks at its trailing `strip_width` columns and
//! counts pixels brighter than `luma_threshold`.
use crate::detector::BridgeParams;
use crate::image::{Frame, ImageView};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeInspection {
    pub bright_pixels: usize,
    pub present: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeDetector {
    params: BridgeParams,
}

impl Default for BridgeDetector {
    fn default() -> Self {
        Self::new(BridgeParams::default())
    }
}

impl BridgeDetector {
    pub fn new(params: BridgeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    /// Bright pixels in the rightmost `min(strip_width, width)` columns.
    pub fn count_bright(&self, crop: &Frame) -> usize {
        let gray = crop.to_gray();
        let w = gray.width();
        let x0 = w - self.params.strip_width.min(w);
        gray.data()
            .chunks_exact(w)
            .map(|row| {
                row[x0..]
                    .iter()
                    .filter(|&&v| v > self.params.luma_threshold)
                    .count()
            })
            .sum()
    }

    pub fn inspect(&self, crop: &Frame) -> BridgeInspection {
        let bright_pixels = self.count_bright(crop);
        let present = bright_pixels > self.params.min_bright_pixels;
        debug!(
            "BridgeDetector::inspect crop={}x{} bright={} present={}",
            crop.width(),
            crop.height(),
            bright_pixels,
            present
        );
        BridgeInspection {
            bright_pixels,
            present,
        }
    }

    pub fn is_present(&self, crop: &Frame) -> bool {
        self.inspect(crop).present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 60×100 crop whose trailing 20 columns hold `bright` white pixels,
    /// filled column-major from the right. Everything else is mid grey.
    fn crop_with_bright_strip(bright: usize) -> Frame {
        let (w, h) = (60, 100);
        let mut frame = Frame::filled(w, h, [127, 127, 127]).unwrap();
        for i in 0..bright {
            let x = w - 1 - i / h;
            let y = i % h;
            frame.put_pixel(x, y, [255, 255, 255]);
        }
        frame
    }

    #[test]
    fn threshold_is_strict() {
        let det = BridgeDetector::default();
        assert!(!det.is_present(&crop_with_bright_strip(1300)));
        assert!(det.is_present(&crop_with_bright_strip(1301)));
        assert!(!det.is_present(&crop_with_bright_strip(0)));
    }

    #[test]
    fn only_trailing_strip_is_counted() {
        let mut frame = Frame::filled(60, 100, [255, 255, 255]).unwrap();
        for y in 0..100 {
            for x in 40..60 {
                frame.put_pixel(x, y, [0, 0, 0]);
            }
        }
        assert_eq!(BridgeDetector::default().count_bright(&frame), 0);
    }

    #[test]
    fn narrow_crops_use_their_full_width() {
        let frame = Frame::filled(5, 10, [200, 200, 200]).unwrap();
        let inspection = BridgeDetector::default().inspect(&frame);
        assert_eq!(inspection.bright_pixels, 50);
        assert!(!inspection.present);
    }
}
