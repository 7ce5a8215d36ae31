//! Per-column colour profile of a region of interest.

use image::RgbImage;

use crate::frame::{self, RoiRect, STORAGE_ORDER};

/// Mean channel values for every pixel column of a region, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnProfile {
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
    /// `(red + green + blue) / 3` of the column means.
    pub intensity: Vec<f64>,
}

/// Averages each channel down every column of `cropped`.
///
/// Means are accumulated in floating point and are not rounded. An image
/// with no rows yields an empty profile.
pub fn analyze(cropped: &RgbImage) -> ColumnProfile {
    let (width, height) = cropped.dimensions();
    let mut profile = ColumnProfile {
        red: Vec::with_capacity(width as usize),
        green: Vec::with_capacity(width as usize),
        blue: Vec::with_capacity(width as usize),
        intensity: Vec::with_capacity(width as usize),
    };
    if height == 0 {
        return profile;
    }

    let inv_rows = 1.0 / height as f64;
    for x in 0..width {
        let mut sums = [0.0f64; 3];
        for y in 0..height {
            let (r, g, b) = STORAGE_ORDER.split(&cropped.get_pixel(x, y).0);
            sums[0] += r as f64;
            sums[1] += g as f64;
            sums[2] += b as f64;
        }
        let r = sums[0] * inv_rows;
        let g = sums[1] * inv_rows;
        let b = sums[2] * inv_rows;
        profile.red.push(r);
        profile.green.push(g);
        profile.blue.push(b);
        profile.intensity.push((r + g + b) / 3.0);
    }
    profile
}

/// Everything the analysis figure shows for one selection.
pub struct RoiAnalysis {
    pub roi: RoiRect,
    pub cropped: RgbImage,
    pub profile: ColumnProfile,
}

impl RoiAnalysis {
    /// Crops `roi` out of `image` and profiles it. Returns `None` when the
    /// rectangle does not cover any pixel.
    pub fn new(image: &RgbImage, roi: RoiRect) -> Option<Self> {
        let roi = roi.clamp_to(image.width(), image.height());
        if roi.is_degenerate() {
            return None;
        }
        let cropped = frame::crop(image, roi);
        let profile = analyze(&cropped);
        Some(Self {
            roi,
            cropped,
            profile,
        })
    }
}
