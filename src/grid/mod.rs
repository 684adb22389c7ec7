//! Grid extent from near-axis-aligned segments.
//!
//! Strings show up as horizontal segments and frets as vertical ones. For
//! each axis the segments close enough to that axis are reduced to scalar
//! coordinates (both endpoints' y for strings, both endpoints' x for frets),
//! sorted, and scanned for the run of closely spaced values that marks the
//! outer edge of the grid. See [`LineCluster::extent`].

pub mod cluster1d;

pub use cluster1d::{AxisExtent, LineCluster};

use crate::segments::LineSegment;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridAxis {
    /// Strings: rows, from segments with small `|dy|`.
    Horizontal,
    /// Frets: columns, from segments with small `|dx|`.
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridClusterer {
    pub axis: GridAxis,
    /// Segments must have `|dy|` (horizontal) or `|dx|` (vertical) below this.
    pub straightness: i32,
    pub gap_threshold: i32,
    pub skip: usize,
}

impl GridClusterer {
    pub fn horizontal() -> Self {
        Self {
            axis: GridAxis::Horizontal,
            straightness: 10,
            gap_threshold: 6,
            skip: 3,
        }
    }

    pub fn vertical() -> Self {
        Self {
            axis: GridAxis::Vertical,
            straightness: 5,
            gap_threshold: 10,
            skip: 2,
        }
    }

    /// Near-axis segments reduced to their sorted coordinates.
    pub fn collect(&self, segments: &[LineSegment]) -> LineCluster {
        let coords = segments
            .iter()
            .filter_map(|s| match self.axis {
                GridAxis::Horizontal if s.dy().abs() < self.straightness => Some([s.y1, s.y2]),
                GridAxis::Vertical if s.dx().abs() < self.straightness => Some([s.x1, s.x2]),
                _ => None,
            })
            .flatten()
            .collect();
        LineCluster::from_coords(coords)
    }

    pub fn cluster(&self, segments: &[LineSegment]) -> AxisExtent {
        let cluster = self.collect(segments);
        let extent = cluster.extent(self.gap_threshold, self.skip);
        debug!(
            "GridClusterer::cluster axis={:?} segments={} coords={} first={:?} last={:?}",
            self.axis,
            segments.len(),
            cluster.len(),
            extent.first,
            extent.last
        );
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bound;

    fn hline(y: i32) -> LineSegment {
        LineSegment::new(20, y, 400, y)
    }

    #[test]
    fn close_strings_bracket_band_and_drop_outlier() {
        let mut segs: Vec<_> = (0..5).map(|k| hline(100 + 4 * k)).collect();
        segs.push(hline(166));
        let e = GridClusterer::horizontal().cluster(&segs);
        // Leading coordinates inside the skip window are passed over.
        assert_eq!(e.first, Bound::At(108));
        assert_eq!(e.last, Bound::At(116));
    }

    #[test]
    fn steep_segments_do_not_count_as_strings() {
        let segs = [
            LineSegment::new(0, 0, 100, 10),
            LineSegment::new(0, 0, 100, 40),
        ];
        assert!(GridClusterer::horizontal().collect(&segs).is_empty());
    }

    #[test]
    fn frets_use_x_coordinates_of_vertical_segments() {
        let mut segs: Vec<_> = (0..6).map(|k| LineSegment::new(200 + 8 * k, 10, 201 + 8 * k, 90)).collect();
        segs.push(LineSegment::new(0, 50, 300, 52));
        let c = GridClusterer::vertical().collect(&segs);
        assert_eq!(c.len(), 12);
        let e = GridClusterer::vertical().cluster(&segs);
        assert_eq!(e.first, Bound::At(209));
        assert_eq!(e.last, Bound::At(240));
    }

    #[test]
    fn no_segments_leave_both_sides_unbounded() {
        assert_eq!(GridClusterer::vertical().cluster(&[]), AxisExtent::UNBOUNDED);
    }
}
