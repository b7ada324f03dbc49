#![allow(dead_code)]

use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};

pub const PART: u8 = 30;
pub const BACKGROUND: u8 = 225;

/// Angular window on the outer rim, in image degrees (y down).
#[derive(Clone, Copy, Debug)]
pub struct RimWindow {
    pub center_deg: f64,
    pub half_width_deg: f64,
    /// Radial change in pixels; material removed for notches, added for bumps.
    pub depth: f64,
}

impl RimWindow {
    pub fn new(center_deg: f64, half_width_deg: f64, depth: f64) -> Self {
        Self {
            center_deg,
            half_width_deg,
            depth,
        }
    }

    fn contains(&self, angle_deg: f64) -> bool {
        let mut d = (angle_deg - self.center_deg) % 360.0;
        if d > 180.0 {
            d -= 360.0;
        } else if d < -180.0 {
            d += 360.0;
        }
        d.abs() <= self.half_width_deg
    }
}

/// Dark annulus on a light background, centred in a square image.
#[derive(Clone, Debug)]
pub struct SyntheticRing {
    pub size: u32,
    pub r_out: f64,
    pub r_in: f64,
    pub part: u8,
    pub background: u8,
    pub notches: Vec<RimWindow>,
    pub bumps: Vec<RimWindow>,
}

impl SyntheticRing {
    pub fn new(size: u32, r_out: f64, r_in: f64) -> Self {
        Self {
            size,
            r_out,
            r_in,
            part: PART,
            background: BACKGROUND,
            notches: Vec::new(),
            bumps: Vec::new(),
        }
    }

    /// The default test part: 800 px frame, rim radius 350, bore radius 150.
    pub fn standard() -> Self {
        Self::new(800, 350.0, 150.0)
    }

    pub fn with_notch(mut self, window: RimWindow) -> Self {
        self.notches.push(window);
        self
    }

    pub fn with_bump(mut self, window: RimWindow) -> Self {
        self.bumps.push(window);
        self
    }

    pub fn with_intensities(mut self, part: u8, background: u8) -> Self {
        self.part = part;
        self.background = background;
        self
    }

    pub fn center(&self) -> f64 {
        (self.size / 2) as f64
    }

    fn rim_radius(&self, angle_deg: f64) -> f64 {
        let mut r = self.r_out;
        for n in self.notches.iter().filter(|w| w.contains(angle_deg)) {
            r -= n.depth;
        }
        for b in self.bumps.iter().filter(|w| w.contains(angle_deg)) {
            r += b.depth;
        }
        r
    }

    pub fn render(&self) -> GrayImage {
        let c = self.center();
        GrayImage::from_fn(self.size, self.size, |x, y| {
            let dx = x as f64 - c;
            let dy = y as f64 - c;
            let d = (dx * dx + dy * dy).sqrt();
            let angle = dy.atan2(dx).to_degrees();
            if d >= self.r_in && d <= self.rim_radius(angle) {
                Luma([self.part])
            } else {
                Luma([self.background])
            }
        })
    }

    pub fn save(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        self.render().save(&path).expect("write synthetic ring");
        path
    }
}

/// Smallest absolute difference between two angles in degrees.
pub fn angle_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
