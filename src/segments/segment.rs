use serde::{Deserialize, Serialize};

/// Straight segment between two integer pixel positions, `(x1, y1)` to
/// `(x2, y2)`. Endpoint order carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn dx(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn dy(&self) -> i32 {
        self.y2 - self.y1
    }

    /// `|dy / dx|`, or `None` for vertical segments.
    pub fn abs_slope(&self) -> Option<f64> {
        let dx = self.dx();
        if dx == 0 {
            None
        } else {
            Some((self.dy() as f64 / dx as f64).abs())
        }
    }

    pub fn length(&self) -> f64 {
        (self.dx() as f64).hypot(self.dy() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_ignores_direction_and_skips_verticals() {
        let s = LineSegment::new(10, 20, 0, 21);
        assert_eq!(s.abs_slope(), Some(0.1));
        assert_eq!(LineSegment::new(3, 0, 3, 9).abs_slope(), None);
        assert_eq!(LineSegment::new(0, 0, 3, 4).length(), 5.0);
    }
}
