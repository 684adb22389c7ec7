//! Progressive probabilistic Hough transform over a binary edge mask.
//!
//! Edge pixels are visited in a seeded random order. Each live pixel votes
//! into a (theta, rho) accumulator; once a cell reaches the vote threshold the
//! corresponding line is traced through the mask in both directions, bridging
//! gaps up to `max_line_gap`. Traced pixels are removed from the mask, and
//! their votes are withdrawn when the trace yields an accepted segment, so
//! each pixel contributes to at most one output segment.
//!
//! Tracing uses 16.16 fixed point along the minor axis and one-pixel steps
//! along the major axis.
use super::options::HoughOptions;
use super::segment::LineSegment;
use crate::edges::EdgeMask;
use crate::image::ImageView;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const NUM_ANGLES: usize = 180;
const SHIFT: u32 = 16;

struct Accumulator {
    trig: Vec<(f32, f32)>,
    num_rho: usize,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(width: usize, height: usize) -> Self {
        let step = std::f32::consts::PI / NUM_ANGLES as f32;
        let trig = (0..NUM_ANGLES)
            .map(|n| {
                let theta = n as f32 * step;
                (theta.cos(), theta.sin())
            })
            .collect();
        let num_rho = 2 * (width + height) + 1;
        Self {
            trig,
            num_rho,
            votes: vec![0; NUM_ANGLES * num_rho],
        }
    }

    #[inline]
    fn cell(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as isize;
        let offset = ((self.num_rho - 1) / 2) as isize;
        n * self.num_rho + (r + offset) as usize
    }

    /// Add the votes of `(x, y)` and return the strongest angle index and its
    /// count, considering only counts of at least `floor`.
    fn vote(&mut self, x: usize, y: usize, floor: u32) -> Option<(usize, u32)> {
        let mut best: Option<(usize, u32)> = None;
        let mut max_val = floor.saturating_sub(1);
        for n in 0..NUM_ANGLES {
            let idx = self.cell(n, x, y);
            self.votes[idx] += 1;
            let val = self.votes[idx];
            if val > max_val {
                max_val = val;
                best = Some((n, val));
            }
        }
        best
    }

    fn withdraw(&mut self, x: usize, y: usize) {
        for n in 0..NUM_ANGLES {
            let idx = self.cell(n, x, y);
            self.votes[idx] = self.votes[idx].saturating_sub(1);
        }
    }
}

/// Fixed-point walker along one line direction.
#[derive(Clone, Copy)]
struct Walk {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    major_x: bool,
}

impl Walk {
    fn new(x: usize, y: usize, cos_t: f32, sin_t: f32) -> Self {
        // Line direction is perpendicular to the normal (cos, sin).
        let a = -sin_t;
        let b = cos_t;
        let one = (1i64 << SHIFT) as f32;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x0: x as i64,
                y0: ((y as i64) << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                major_x: true,
            }
        } else {
            Self {
                x0: ((x as i64) << SHIFT) + half,
                y0: y as i64,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                major_x: false,
            }
        }
    }

    /// Pixels visited from the seed in direction `k` (0 forward, 1 backward)
    /// until the image border.
    fn pixels(self, k: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
        let sign = if k == 0 { 1 } else { -1 };
        let (dx, dy) = (self.dx * sign, self.dy * sign);
        let major_x = self.major_x;
        (0i64..)
            .map(move |t| {
                let x = self.x0 + t * dx;
                let y = self.y0 + t * dy;
                if major_x {
                    (x, y >> SHIFT)
                } else {
                    (x >> SHIFT, y)
                }
            })
            .take_while(move |&(x, y)| x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h)
            .map(|(x, y)| (x as usize, y as usize))
    }
}

/// Run the transform on `mask`. The same mask, options and seed always yield
/// the same segments in the same order.
pub fn probabilistic_hough(mask: &EdgeMask, options: &HoughOptions, seed: u64) -> Vec<LineSegment> {
    let (w, h) = (mask.width(), mask.height());
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let mut live: Vec<bool> = mask.data().iter().map(|&v| v != 0).collect();
    let mut voted = vec![false; w * h];
    let mut points: Vec<(usize, usize)> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| live[y * w + x])
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    points.shuffle(&mut rng);

    let mut acc = Accumulator::new(w, h);
    let max_gap = options.max_line_gap as usize;
    let min_len = options.min_line_length as usize;
    let mut lines = Vec::new();

    for &(x, y) in &points {
        if !live[y * w + x] {
            continue;
        }
        voted[y * w + x] = true;
        let Some((n, _)) = acc.vote(x, y, options.vote_threshold) else {
            continue;
        };
        let (cos_t, sin_t) = acc.trig[n];
        let walk = Walk::new(x, y, cos_t, sin_t);

        let mut ends = [(x, y); 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let mut gap = 0usize;
            for (px, py) in walk.pixels(k, w, h) {
                if live[py * w + px] {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
            }
        }

        let good = ends[0].0.abs_diff(ends[1].0) >= min_len || ends[0].1.abs_diff(ends[1].1) >= min_len;

        for (k, &end) in ends.iter().enumerate() {
            for (px, py) in walk.pixels(k, w, h) {
                let idx = py * w + px;
                if live[idx] {
                    if good && voted[idx] {
                        acc.withdraw(px, py);
                        voted[idx] = false;
                    }
                    live[idx] = false;
                }
                if (px, py) == end {
                    break;
                }
            }
        }

        if good {
            lines.push(LineSegment::new(
                ends[0].0 as i32,
                ends[0].1 as i32,
                ends[1].0 as i32,
                ends[1].1 as i32,
            ));
        }
    }
    debug!(
        "LineDetector::hough points={} lines={} w={} h={}",
        points.len(),
        lines.len(),
        w,
        h
    );
    lines
}
