use super::*;
use crate::edges::EdgeMask;

fn detector(min_len: u32, gap: u32) -> LineDetector {
    LineDetector::new(
        HoughOptions {
            vote_threshold: 20,
            min_line_length: min_len,
            max_line_gap: gap,
        },
        7,
    )
}

#[test]
fn finds_single_horizontal_line() {
    let mask = EdgeMask::from_fn(120, 60, |x, y| y == 30 && (10..=100).contains(&x)).unwrap();
    let lines = detector(30, 5).detect(&mask);
    assert_eq!(lines.len(), 1, "lines: {lines:?}");
    let l = lines[0];
    assert_eq!(l.y1, 30);
    assert_eq!(l.y2, 30);
    assert_eq!(l.x1.min(l.x2), 10);
    assert_eq!(l.x1.max(l.x2), 100);
}

#[test]
fn finds_single_vertical_line() {
    let mask = EdgeMask::from_fn(60, 120, |x, y| x == 17 && (5..=95).contains(&y)).unwrap();
    let lines = detector(30, 5).detect(&mask);
    assert_eq!(lines.len(), 1, "lines: {lines:?}");
    let l = lines[0];
    assert_eq!((l.x1, l.x2), (17, 17));
    assert_eq!(l.y1.min(l.y2), 5);
    assert_eq!(l.y1.max(l.y2), 95);
    assert_eq!(l.abs_slope(), None);
}

#[test]
fn bridges_gaps_up_to_max_gap() {
    let mask = EdgeMask::from_fn(120, 40, |x, y| {
        y == 20 && (10..=110).contains(&x) && !(50..54).contains(&x)
    })
    .unwrap();
    let lines = detector(80, 10).detect(&mask);
    assert_eq!(lines.len(), 1, "lines: {lines:?}");
    assert_eq!(lines[0].dx().abs(), 100);
}

#[test]
fn short_runs_are_rejected() {
    let mask = EdgeMask::from_fn(100, 40, |x, y| y == 20 && (10..40).contains(&x)).unwrap();
    assert!(detector(50, 5).detect(&mask).is_empty());
}

#[test]
fn empty_mask_yields_nothing() {
    let mask = EdgeMask::from_fn(64, 64, |_, _| false).unwrap();
    assert!(detector(10, 5).detect(&mask).is_empty());
}

#[test]
fn same_seed_same_segments() {
    let mask = EdgeMask::from_fn(200, 120, |x, y| {
        (y % 20 == 0 && y > 0) || (x % 37 == 0 && (10..110).contains(&y))
    })
    .unwrap();
    let det = detector(30, 5);
    assert_eq!(det.detect(&mask), det.detect(&mask));
}
