use card_detector::classifier::{Classifier, RankClassifier, SuitClassifier};
use card_detector::config::{load_config, RuntimeConfig};
use card_detector::detector::CardDetector;
use card_detector::diagnostics::{DetectionReport, InputDescriptor};
use card_detector::image::io::{load_color_image, save_rgb, write_json_file};
use card_detector::image::overlay::{draw_quad, draw_regions, draw_segments, QUAD_COLOR};
use card_detector::segments::Segment;
use card_detector::CardDetection;
use image::Rgb;
use log::{info, warn};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: card_detector <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let frame = load_color_image(&config.input).map_err(|e| e.to_string())?;
    let roi = config
        .roi
        .as_ref()
        .and_then(|r| r.resolve(frame.width(), frame.height()));
    let rank = config
        .rank_model
        .as_deref()
        .map(RankClassifier::load)
        .transpose()
        .map_err(|e| e.to_string())?;
    let suit = config
        .suit_model
        .as_deref()
        .map(SuitClassifier::load)
        .transpose()
        .map_err(|e| e.to_string())?;

    let detector = CardDetector::new(config.params.clone());
    let result = match roi {
        Some(r) => detector.process_frame(&frame, &r),
        None => detector.detect(&frame),
    };

    let report = match result {
        Ok(detection) => {
            let mut report = detection.report();
            report.input.path = Some(config.input.clone());
            report.rank = rank
                .as_ref()
                .and_then(|c| detection.num_crop.as_ref().and_then(|img| c.classify(img)));
            report.suit = suit
                .as_ref()
                .and_then(|c| detection.flag_crop.as_ref().and_then(|img| c.classify(img)));
            save_artifacts(&config, &frame, &detection)?;
            info!(
                "card found: regions={} rank={:?} suit={:?} total_ms={:.3}",
                report.regions.len(),
                report.rank,
                report.suit,
                report.timings.total_ms
            );
            report
        }
        Err(err) => {
            warn!("no card in {}: {err}", config.input.display());
            let mut report = DetectionReport::new(InputDescriptor {
                path: Some(config.input.clone()),
                width: frame.width(),
                height: frame.height(),
                roi,
            });
            report.error = Some(err.to_string());
            report
        }
    };

    let json_path = config.output.json_path();
    write_json_file(&json_path, &report)?;
    println!("Saved report to {}", json_path.display());
    Ok(())
}

fn save_artifacts(
    config: &RuntimeConfig,
    frame: &image::RgbImage,
    detection: &CardDetection,
) -> Result<(), String> {
    let dir = &config.output.dir;
    save_rgb(&detection.card, &dir.join("card.png"))?;
    if let Some(crop) = &detection.num_crop {
        save_rgb(crop, &dir.join("num.png"))?;
    }
    if let Some(crop) = &detection.flag_crop {
        save_rgb(crop, &dir.join("flag.png"))?;
    }
    if !config.output.overlays {
        return Ok(());
    }

    let mut frame_overlay = frame.clone();
    let (dx, dy) = detection.roi.map_or((0, 0), |r| (r.x as i32, r.y as i32));
    let shift = |segs: &[Segment]| -> Vec<Segment> {
        segs.iter().map(|s| s.translated(dx, dy)).collect()
    };
    let oriented = &detection.corners.oriented;
    draw_segments(&mut frame_overlay, &shift(&oriented.horizontal), Rgb([255, 255, 0]));
    draw_segments(&mut frame_overlay, &shift(&oriented.vertical), Rgb([255, 0, 255]));
    draw_quad(&mut frame_overlay, &detection.quad_in_frame(), QUAD_COLOR);
    save_rgb(&frame_overlay, &dir.join("frame_overlay.png"))?;

    let mut card_overlay = detection.card.clone();
    draw_regions(&mut card_overlay, &detection.regions);
    save_rgb(&card_overlay, &dir.join("card_overlay.png"))?;
    Ok(())
}
