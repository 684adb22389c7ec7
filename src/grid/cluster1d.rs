//! One-dimensional gap scan over line coordinates.
use crate::types::Bound;
use serde::{Deserialize, Serialize};

/// Leading and trailing coordinate of the densest run found on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub first: Bound,
    pub last: Bound,
}

impl AxisExtent {
    pub const UNBOUNDED: AxisExtent = AxisExtent {
        first: Bound::Unbounded,
        last: Bound::Unbounded,
    };
}

/// Sorted coordinates with the gap preceding each one (zero for the first).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCluster {
    pub coords: Vec<i32>,
    pub gaps: Vec<i32>,
}

impl LineCluster {
    pub fn from_coords(mut coords: Vec<i32>) -> Self {
        coords.sort_unstable();
        let gaps = coords
            .iter()
            .enumerate()
            .map(|(i, &c)| if i == 0 { 0 } else { c - coords[i - 1] })
            .collect();
        Self { coords, gaps }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Scan every coordinate but the largest. A coordinate whose preceding
    /// gap is below `gap_threshold` moves `last` to it; the first such
    /// coordinate past index `skip` also sets `first`.
    ///
    /// Negative coordinates clamp to zero.
    pub fn extent(&self, gap_threshold: i32, skip: usize) -> AxisExtent {
        let mut first = Bound::Unbounded;
        let mut last = Bound::Unbounded;
        let scan = self.coords.len().saturating_sub(1);
        for (i, (&c, &gap)) in self.coords.iter().zip(&self.gaps).take(scan).enumerate() {
            if gap >= gap_threshold {
                continue;
            }
            let at = Bound::At(c.max(0) as usize);
            last = at;
            if i > skip && !first.is_bounded() {
                first = at;
            }
        }
        AxisExtent { first, last }
    }
}
