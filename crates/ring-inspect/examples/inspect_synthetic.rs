//! Generate a notched ring, inspect it and write the annotated overlay.
//!
//! Usage: `cargo run --example inspect_synthetic -- [OUT_DIR]`

use std::{env, fs, path::PathBuf};

use image::{GrayImage, Luma};
use ring_inspect::core::init_with_level;
use ring_inspect::detect::inspect_image;
use ring_inspect::render::save_annotated;
use ring_inspect::InspectParams;

const SIZE: u32 = 640;
const R_OUT: f64 = 280.0;
const R_IN: f64 = 120.0;
const NOTCH_DEG: f64 = 135.0;
const NOTCH_DEPTH: f64 = 9.0;

fn synthetic_part() -> GrayImage {
    let c = (SIZE / 2) as f64;
    GrayImage::from_fn(SIZE, SIZE, |x, y| {
        let dx = x as f64 - c;
        let dy = y as f64 - c;
        let d = (dx * dx + dy * dy).sqrt();
        let rim = if (dy.atan2(dx).to_degrees() - NOTCH_DEG).abs() < 4.0 {
            R_OUT - NOTCH_DEPTH
        } else {
            R_OUT
        };
        Luma([if d >= R_IN && d <= rim { 35 } else { 220 }])
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(log::LevelFilter::Debug)?;

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("ring-inspect-example"));
    fs::create_dir_all(&out_dir)?;

    let raster = synthetic_part();
    raster.save(out_dir.join("input.png"))?;

    let report = inspect_image(&raster, InspectParams::default())?;
    println!("{}", report.result);
    println!("{}", serde_json::to_string_pretty(&report)?);

    let overlay = out_dir.join(format!("output_{}.png", report.classification()));
    save_annotated(&raster, &report, &overlay)?;
    println!("overlay written to {}", overlay.display());
    Ok(())
}
