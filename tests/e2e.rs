mod common;

use common::synthetic_image::FretboardScene;
use fretboard_detector::image::Frame;
use fretboard_detector::{FretboardDetector, FretboardError, FretboardParams, RejectReason};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detector() -> FretboardDetector {
    FretboardDetector::new(FretboardParams::default())
}

fn assert_near(actual: usize, expected: i64, tol: i64, what: &str) {
    assert!(
        (actual as i64 - expected).abs() <= tol,
        "{what}: got {actual}, expected {expected} ± {tol}"
    );
}

#[test]
fn tilted_fretboard_is_straightened_and_accepted() {
    init_logger();
    let scene = FretboardScene {
        theta_deg: 3.0,
        ..FretboardScene::default()
    };
    let report = detector().detect_with_report(&scene.render()).unwrap();

    let angle = report.trace.rotation.estimate.angle_deg;
    assert!((angle - 3.0).abs() < 0.5, "angle estimate {angle:.3}");
    assert!(report.is_accepted(), "rejected: {:?}", report.rejection());

    let candidate = report.candidate.as_ref().unwrap();
    let region = candidate.region.unwrap();
    let (top, bottom, left, right) = scene.extent();
    assert_near(region.top, top, 15, "top");
    assert_near(region.bottom, bottom, 15, "bottom");
    assert_near(region.left, left, 15, "left");
    assert_near(region.right, right, 15, "right");

    let crop = candidate.accepted_crop().unwrap();
    let rect = candidate.crop_rect.unwrap();
    assert_eq!((crop.width(), crop.height()), (rect.width, rect.height));
    assert!(report.trace.bridge_pixels.unwrap() > 1300);
}

#[test]
fn upright_fretboard_is_accepted_without_rotation() {
    init_logger();
    let scene = FretboardScene::default();
    let candidate = detector()
        .detect(&scene.render())
        .unwrap()
        .expect("fretboard should be detected");
    let region = candidate.region.unwrap();
    let (top, bottom, left, right) = scene.extent();
    assert_near(region.top, top, 15, "top");
    assert_near(region.bottom, bottom, 15, "bottom");
    assert_near(region.left, left, 15, "left");
    assert_near(region.right, right, 15, "right");
}

#[test]
fn short_neck_is_rejected_by_envelope() {
    init_logger();
    let scene = FretboardScene {
        fret_spacing: 25,
        ..FretboardScene::default()
    };
    let frame = scene.render();
    let report = detector().detect_with_report(&frame).unwrap();
    assert!(
        matches!(report.rejection(), Some(RejectReason::OutsideEnvelope { .. })),
        "unexpected outcome: {:?}",
        report.rejection()
    );
    assert!(detector().detect(&frame).unwrap().is_none());
}

#[test]
fn missing_bridge_is_rejected() {
    init_logger();
    let scene = FretboardScene {
        theta_deg: 3.0,
        bridge_width: 0,
        ..FretboardScene::default()
    };
    let report = detector().detect_with_report(&scene.render()).unwrap();
    match report.rejection() {
        Some(RejectReason::BridgeMissing { bright_pixels }) => assert!(*bright_pixels <= 1300),
        other => panic!("expected a missing bridge, got {other:?}"),
    }
    assert!(!report.is_accepted());
}

#[test]
fn blank_frame_yields_no_detection() {
    init_logger();
    let frame = Frame::filled(320, 240, [40, 40, 40]).unwrap();
    let report = detector().detect_with_report(&frame).unwrap();
    assert_eq!(report.trace.rotation.estimate.angle_deg, 0.0);
    assert!(report.candidate.is_none());
    assert_eq!(report.rejection(), Some(&RejectReason::NoStringLines));
    assert!(detector().detect(&frame).unwrap().is_none());
}

#[test]
fn zero_area_frames_are_invalid_input() {
    let err = Frame::from_raw(0, 10, Vec::new()).unwrap_err();
    assert!(matches!(err, FretboardError::InvalidInput { .. }));
    let err = Frame::from_raw(4, 4, vec![0; 10]).unwrap_err();
    assert!(matches!(err, FretboardError::InvalidInput { .. }));
}

#[test]
fn batch_results_follow_input_order() {
    init_logger();
    let frames = vec![
        Frame::filled(320, 240, [0, 0, 0]).unwrap(),
        FretboardScene::default().render(),
        FretboardScene {
            fret_spacing: 25,
            ..FretboardScene::default()
        }
        .render(),
    ];
    let results = detector().detect_batch(&frames);
    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().unwrap().is_none());
    assert!(results[1].as_ref().unwrap().is_some());
    assert!(results[2].as_ref().unwrap().is_none());
}

#[test]
fn report_serializes_to_json() {
    let report = detector()
        .detect_with_report(&FretboardScene::default().render())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["trace"]["timings"]["totalMs"].is_number());
    assert_eq!(json["trace"]["input"]["width"], 800);
    assert_eq!(json["candidate"]["verdict"], "accepted");
}
