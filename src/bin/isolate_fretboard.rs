use fretboard_detector::config::{load_config, RunConfig};
use fretboard_detector::edges::GradientAxis;
use fretboard_detector::image::io::{load_frame, save_frame, save_gray, write_json_file};
use fretboard_detector::image::Frame;
use fretboard_detector::{DetectionReport, FretboardDetector};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let detector = FretboardDetector::new(config.params.clone());

    let entries: Vec<FrameEntry> = config
        .inputs
        .par_iter()
        .map(|input| process_input(&detector, &config, input))
        .collect();

    let accepted = entries.iter().filter(|e| e.crop.is_some()).count();
    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    for entry in entries.iter().filter_map(|e| e.error.as_ref().map(|err| (&e.input, err))) {
        warn!("{}: {}", entry.0.display(), entry.1);
    }

    if let Some(report_path) = &config.output.report_json {
        write_json_file(report_path, &entries)?;
        println!("Saved report to {}", report_path.display());
    }
    println!(
        "Processed {} frames: {} accepted, {} failed",
        entries.len(),
        accepted,
        failed
    );
    Ok(())
}

fn process_input(detector: &FretboardDetector, config: &RunConfig, input: &Path) -> FrameEntry {
    let mut entry = FrameEntry {
        input: input.to_path_buf(),
        crop: None,
        report: None,
        error: None,
    };
    match detect_and_save(detector, config, input) {
        Ok((report, crop)) => {
            entry.report = Some(report);
            entry.crop = crop;
        }
        Err(err) => entry.error = Some(err),
    }
    entry
}

fn detect_and_save(
    detector: &FretboardDetector,
    config: &RunConfig,
    input: &Path,
) -> Result<(DetectionReport, Option<PathBuf>), String> {
    let frame = load_frame(input)?;
    let report = detector
        .detect_with_report(&frame)
        .map_err(|e| format!("{}: {e}", input.display()))?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());

    if let Some(edges_dir) = &config.output.edges_dir {
        dump_edges(detector, &frame, &edges_dir.join(&stem))?;
    }

    let crop = match report.candidate.as_ref().and_then(|c| c.accepted_crop()) {
        Some(crop) => {
            let path = config.output.crops_dir.join(format!("{stem}.png"));
            save_frame(crop, &path)?;
            info!("{} -> {}", input.display(), path.display());
            Some(path)
        }
        None => {
            info!("{}: no fretboard ({:?})", input.display(), report.rejection());
            None
        }
    };
    Ok((report, crop))
}

fn dump_edges(detector: &FretboardDetector, frame: &Frame, prefix: &Path) -> Result<(), String> {
    let (derotated, _) = detector
        .correct_rotation(frame)
        .map_err(|e| e.to_string())?;
    let gray = derotated.to_gray();
    let params = detector.params();
    for (name, axis, axis_params) in [
        ("strings", GradientAxis::Rows, &params.strings),
        ("frets", GradientAxis::Cols, &params.frets),
    ] {
        let mask = axis_params
            .edge_extractor(axis)
            .extract(&gray.as_view())
            .map_err(|e| e.to_string())?;
        let path = PathBuf::from(format!("{}_{name}.png", prefix.display()));
        save_gray(&mask.to_gray(), &path)?;
    }
    Ok(())
}

fn usage() -> String {
    "Usage: isolate_fretboard <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameEntry {
    input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    crop: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<DetectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}
