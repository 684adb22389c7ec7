//! Morphological closing with a vertical line element.
//!
//! The element is a single column `kernel_height` pixels tall, anchored at
//! row `kernel_height / 2`, so it covers offsets
//! `-(kernel_height / 2) ..= kernel_height - 1 - kernel_height / 2`.
//! Samples outside the mask are ignored by both dilation and erosion.
use super::mask::{EdgeMask, EDGE_ON};
use crate::image::ImageView;

fn element_offsets(kernel_height: usize) -> std::ops::RangeInclusive<isize> {
    let anchor = (kernel_height / 2) as isize;
    -anchor..=(kernel_height as isize - 1 - anchor)
}

fn vertical_extremum(mask: &EdgeMask, kernel_height: usize, dilate: bool) -> EdgeMask {
    let (w, h) = (mask.width(), mask.height());
    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = !dilate;
            for dy in element_offsets(kernel_height) {
                let yy = y as isize + dy;
                if yy < 0 || yy >= h as isize {
                    continue;
                }
                let set = mask.is_set(x, yy as usize);
                if dilate {
                    acc |= set;
                } else {
                    acc &= set;
                }
            }
            if acc {
                out[y * w + x] = EDGE_ON;
            }
        }
    }
    EdgeMask::from_parts(w, h, out)
}

/// Dilate then erode with a vertical line element, bridging short vertical
/// gaps (e.g. fret edges interrupted by strings) without widening edges.
pub fn close_vertical(mask: &EdgeMask, kernel_height: usize) -> EdgeMask {
    if kernel_height <= 1 {
        return mask.clone();
    }
    let dilated = vertical_extremum(mask, kernel_height, true);
    vertical_extremum(&dilated, kernel_height, false)
}
