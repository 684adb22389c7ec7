use crate::image::Frame;
use serde::{Deserialize, Serialize};

/// One side of a bounding box: a concrete pixel coordinate, or no dense
/// cluster found on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bound {
    At(usize),
    Unbounded,
}

impl Bound {
    /// Concrete coordinate, or `fallback` when unbounded.
    #[inline]
    pub fn resolve(self, fallback: usize) -> usize {
        match self {
            Bound::At(v) => v,
            Bound::Unbounded => fallback,
        }
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, Bound::At(_))
    }
}

/// Outer extent of the string/fret grid in derotated frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub first_row: Bound,
    pub last_row: Bound,
    pub first_col: Bound,
    pub last_col: Bound,
}

impl BoundingBox {
    /// Resolve sentinels against a `width × height` frame: unbounded leading
    /// sides become 0, unbounded trailing sides the far edge. Everything is
    /// clamped to the frame. Returns `None` unless `top < bottom` and
    /// `left < right` afterwards.
    pub fn resolve(&self, width: usize, height: usize) -> Option<PixelBox> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = width - 1;
        let max_y = height - 1;
        let b = PixelBox {
            top: self.first_row.resolve(0).min(max_y),
            bottom: self.last_row.resolve(max_y).min(max_y),
            left: self.first_col.resolve(0).min(max_x),
            right: self.last_col.resolve(max_x).min(max_x),
        };
        (b.top < b.bottom && b.left < b.right).then_some(b)
    }
}

/// Resolved inclusive box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl PixelBox {
    /// Column span `right - left`.
    #[inline]
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    /// Row span `bottom - top`.
    #[inline]
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Half-open crop rectangle grown by `pad` on every side and clamped to
    /// a `frame_w × frame_h` frame.
    pub fn padded(&self, pad: usize, frame_w: usize, frame_h: usize) -> PixelRect {
        let x = self.left.saturating_sub(pad);
        let y = self.top.saturating_sub(pad);
        let x1 = (self.right + pad).min(frame_w);
        let y1 = (self.bottom + pad).min(frame_h);
        PixelRect {
            x,
            y,
            width: x1.saturating_sub(x),
            height: y1.saturating_sub(y),
        }
    }
}

/// Half-open pixel rectangle `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Why a frame produced no fretboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RejectReason {
    /// The string pass found no line segments at all.
    NoStringLines,
    /// The fret pass found no line segments at all.
    NoFretLines,
    /// The resolved box collapsed to an empty span on some axis.
    DegenerateBox,
    /// Box dimensions differ from the expected size by more than the tolerance.
    OutsideEnvelope { width: usize, height: usize },
    /// Box dimensions fall outside the absolute open intervals.
    OutsideAbsoluteBounds { width: usize, height: usize },
    /// Not enough bright pixels in the trailing strip of the crop.
    BridgeMissing { bright_pixels: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

/// Bounding box, its padded crop and the validation verdict for one frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardCandidate {
    pub bbox: BoundingBox,
    /// Resolved box; `None` when the bounding box was degenerate.
    pub region: Option<PixelBox>,
    /// Padded crop rectangle inside the derotated frame.
    pub crop_rect: Option<PixelRect>,
    /// Padded crop, present once the size checks passed.
    #[serde(skip)]
    pub crop: Option<Frame>,
    /// Bright pixels counted in the bridge strip, once the crop exists.
    pub bridge_pixels: Option<usize>,
    pub verdict: Verdict,
}

impl FretboardCandidate {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match &self.verdict {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }

    /// The crop of an accepted candidate.
    pub fn accepted_crop(&self) -> Option<&Frame> {
        if self.is_accepted() {
            self.crop.as_ref()
        } else {
            None
        }
    }
}
