//! Size and bridge checks turning a grid box into a fretboard candidate.
use crate::bridge::BridgeDetector;
use crate::detector::EnvelopeParams;
use crate::error::FretboardError;
use crate::image::Frame;
use crate::types::{BoundingBox, FretboardCandidate, PixelBox, RejectReason, Verdict};
use log::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DimensionValidator {
    envelope: EnvelopeParams,
    bridge: BridgeDetector,
}

impl DimensionValidator {
    pub fn new(envelope: EnvelopeParams, bridge: BridgeDetector) -> Self {
        Self { envelope, bridge }
    }

    /// Check the unpadded box against the expected size and the absolute
    /// open intervals, in that order.
    pub fn check_dimensions(&self, region: &PixelBox) -> Result<(), RejectReason> {
        let env = &self.envelope;
        let (width, height) = (region.width(), region.height());
        if width.abs_diff(env.expected_width) > env.tolerance
            || height.abs_diff(env.expected_height) > env.tolerance
        {
            return Err(RejectReason::OutsideEnvelope { width, height });
        }
        let inside = |v: usize, lo: usize, hi: usize| lo < v && v < hi;
        if !inside(width, env.min_width, env.max_width)
            || !inside(height, env.min_height, env.max_height)
        {
            return Err(RejectReason::OutsideAbsoluteBounds { width, height });
        }
        Ok(())
    }

    /// Resolve `bbox` in `frame`, check its size, crop with padding and test
    /// the crop for a bridge. Rejections are reported in the verdict; only a
    /// crop that cannot be taken is an error.
    pub fn evaluate(
        &self,
        frame: &Frame,
        bbox: BoundingBox,
    ) -> Result<FretboardCandidate, FretboardError> {
        let mut candidate = FretboardCandidate {
            bbox,
            region: None,
            crop_rect: None,
            crop: None,
            bridge_pixels: None,
            verdict: Verdict::Rejected(RejectReason::DegenerateBox),
        };
        let Some(region) = bbox.resolve(frame.width(), frame.height()) else {
            debug!("DimensionValidator::evaluate degenerate bbox={:?}", bbox);
            return Ok(candidate);
        };
        candidate.region = Some(region);
        let rect = region.padded(self.envelope.padding, frame.width(), frame.height());
        candidate.crop_rect = Some(rect);

        if let Err(reason) = self.check_dimensions(&region) {
            debug!("DimensionValidator::evaluate rejected {:?}", reason);
            candidate.verdict = Verdict::Rejected(reason);
            return Ok(candidate);
        }

        let crop = frame.crop(&rect)?;
        let bridge = self.bridge.inspect(&crop);
        candidate.bridge_pixels = Some(bridge.bright_pixels);
        candidate.crop = Some(crop);
        candidate.verdict = if bridge.present {
            Verdict::Accepted
        } else {
            Verdict::Rejected(RejectReason::BridgeMissing {
                bright_pixels: bridge.bright_pixels,
            })
        };
        debug!(
            "DimensionValidator::evaluate region={:?} verdict={:?}",
            region, candidate.verdict
        );
        Ok(candidate)
    }

    /// Accepted candidate for `bbox`, or `None` on any failed check.
    pub fn validate(
        &self,
        frame: &Frame,
        bbox: BoundingBox,
    ) -> Result<Option<FretboardCandidate>, FretboardError> {
        let candidate = self.evaluate(frame, bbox)?;
        Ok(candidate.is_accepted().then_some(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bound;

    fn region(width: usize, height: usize) -> PixelBox {
        PixelBox {
            top: 50,
            bottom: 50 + height,
            left: 40,
            right: 40 + width,
        }
    }

    fn bbox_of(r: PixelBox) -> BoundingBox {
        BoundingBox {
            first_row: Bound::At(r.top),
            last_row: Bound::At(r.bottom),
            first_col: Bound::At(r.left),
            last_col: Bound::At(r.right),
        }
    }

    #[test]
    fn near_nominal_box_is_accepted() {
        let v = DimensionValidator::default();
        assert_eq!(v.check_dimensions(&region(601, 101)), Ok(()));
        assert_eq!(v.check_dimensions(&region(635, 119)), Ok(()));
        assert_eq!(v.check_dimensions(&region(560, 91)), Ok(()));
    }

    #[test]
    fn too_wide_box_is_rejected() {
        let v = DimensionValidator::default();
        assert!(v.check_dimensions(&region(660, 101)).is_err());
        assert_eq!(
            v.check_dimensions(&region(380, 100)),
            Err(RejectReason::OutsideEnvelope {
                width: 380,
                height: 100
            })
        );
    }

    #[test]
    fn absolute_bounds_are_exclusive() {
        let v = DimensionValidator::default();
        assert_eq!(
            v.check_dimensions(&region(600, 90)),
            Err(RejectReason::OutsideAbsoluteBounds {
                width: 600,
                height: 90
            })
        );
        assert_eq!(
            v.check_dimensions(&region(600, 125)),
            Err(RejectReason::OutsideAbsoluteBounds {
                width: 600,
                height: 125
            })
        );
    }

    #[test]
    fn accepted_crop_includes_padding_and_bridge() {
        let mut frame = Frame::filled(800, 300, [0, 0, 0]).unwrap();
        let r = region(601, 101);
        // Bright strip covering the trailing 20 columns of the padded crop.
        for y in 35..=166 {
            for x in 636..656 {
                frame.put_pixel(x, y, [250, 250, 250]);
            }
        }
        let cand = DimensionValidator::default()
            .validate(&frame, bbox_of(r))
            .unwrap()
            .expect("accepted");
        let crop = cand.accepted_crop().unwrap();
        assert_eq!((crop.width(), crop.height()), (631, 131));
        assert_eq!(cand.bridge_pixels, Some(20 * 131));
    }

    #[test]
    fn dark_trailing_strip_rejects_with_count() {
        let frame = Frame::filled(800, 300, [0, 0, 0]).unwrap();
        let cand = DimensionValidator::default()
            .evaluate(&frame, bbox_of(region(601, 101)))
            .unwrap();
        assert_eq!(
            cand.reject_reason(),
            Some(&RejectReason::BridgeMissing { bright_pixels: 0 })
        );
        assert!(cand.crop.is_some());
        assert!(cand.accepted_crop().is_none());
    }

    #[test]
    fn unbounded_sides_fall_back_to_frame_edges() {
        let frame = Frame::filled(640, 120, [0, 0, 0]).unwrap();
        let bbox = BoundingBox {
            first_row: Bound::Unbounded,
            last_row: Bound::Unbounded,
            first_col: Bound::At(20),
            last_col: Bound::Unbounded,
        };
        let cand = DimensionValidator::default().evaluate(&frame, bbox).unwrap();
        assert_eq!(cand.region.map(|r| (r.width(), r.height())), Some((619, 119)));
        assert_eq!(cand.reject_reason(), Some(&RejectReason::BridgeMissing { bright_pixels: 0 }));
    }

    #[test]
    fn collapsed_box_is_degenerate() {
        let frame = Frame::filled(100, 100, [0, 0, 0]).unwrap();
        let bbox = BoundingBox {
            first_row: Bound::At(40),
            last_row: Bound::At(40),
            first_col: Bound::At(0),
            last_col: Bound::At(90),
        };
        let cand = DimensionValidator::default().evaluate(&frame, bbox).unwrap();
        assert_eq!(cand.reject_reason(), Some(&RejectReason::DegenerateBox));
        assert!(cand.region.is_none());
    }
}
