//! Whole-buffer geometric transforms.

use image::{Rgb, RgbImage};

/// Largest image the session will display, derived from the monitor once at
/// startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenBounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl ScreenBounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
        }
    }

    pub fn from_display(width: u32, height: u32, fraction: f64) -> Self {
        Self::new(
            (width as f64 * fraction) as u32,
            (height as f64 * fraction) as u32,
        )
    }
}

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

// Sub-pixel offsets below this are snapped so right-angle rotations stay exact.
const SNAP_EPSILON: f64 = 1e-6;

fn snap(v: f64) -> f64 {
    let rounded = v.round();
    if (v - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        v
    }
}

/// Rotates `image` about the centre of its pixel grid, `((w - 1) / 2, (h - 1) / 2)`.
///
/// Positive angles turn counter-clockwise in the mathematical sense, so
/// `-90.0` turns the picture clockwise on screen. The output keeps the input
/// dimensions: content leaving the frame is cropped and uncovered corners
/// are filled with black. Samples are bilinearly interpolated.
pub fn rotate(image: &RgbImage, angle_degrees: f64) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::from_pixel(width, height, BACKGROUND);
    if width == 0 || height == 0 {
        return out;
    }

    let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();
    let cx = (width as f64 - 1.0) * 0.5;
    let cy = (height as f64 - 1.0) * 0.5;
    let max_x = width as f64 - 1.0;
    let max_y = height as f64 - 1.0;

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        let src_x = snap(cos_a * dx - sin_a * dy + cx);
        let src_y = snap(sin_a * dx + cos_a * dy + cy);

        if src_x < -SNAP_EPSILON
            || src_y < -SNAP_EPSILON
            || src_x > max_x + SNAP_EPSILON
            || src_y > max_y + SNAP_EPSILON
        {
            continue;
        }
        *pixel = sample_bilinear(image, src_x.clamp(0.0, max_x), src_y.clamp(0.0, max_y));
    }
    out
}

fn sample_bilinear(image: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let a = image.get_pixel(x0, y0).0;
    let b = image.get_pixel(x1, y0).0;
    let c = image.get_pixel(x0, y1).0;
    let d = image.get_pixel(x1, y1).0;

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    let mut out = [0u8; 3];
    for ch in 0..3 {
        let value =
            a[ch] as f64 * w00 + b[ch] as f64 * w10 + c[ch] as f64 * w01 + d[ch] as f64 * w11;
        out[ch] = value.round().clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}

/// Shrinks `image` so it fits inside `bounds`, preserving aspect ratio.
///
/// `scale = min(max_width / w, max_height / h, 1.0)`: images are never
/// enlarged, and an image that already fits comes back as an unscaled copy.
/// Downscaling averages the exact source area covered by each output pixel.
/// `imageops::resize` only offers separable filter kernels, none of which is
/// an area average, hence the dedicated resampler below.
pub fn resize_to_fit(image: &RgbImage, bounds: ScreenBounds) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let scale = (bounds.max_width as f64 / width as f64)
        .min(bounds.max_height as f64 / height as f64)
        .min(1.0);
    if scale >= 1.0 {
        return image.clone();
    }

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, bounds.max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, bounds.max_height);
    resize_area(image, new_width, new_height)
}

/// Source indices and weights contributing to each output index along one
/// axis, for an area-averaging downscale from `src_len` to `dst_len`.
fn area_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(u32, f64)>> {
    let ratio = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| {
            let start = i as f64 * ratio;
            let end = ((i + 1) as f64 * ratio).min(src_len as f64);
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let covered = (end.min(s as f64 + 1.0) - start.max(s as f64)) / ratio;
                    (covered > 0.0).then(|| (s, covered))
                })
                .collect()
        })
        .collect()
}

fn resize_area(image: &RgbImage, new_width: u32, new_height: u32) -> RgbImage {
    let columns = area_weights(image.width(), new_width);
    let rows = area_weights(image.height(), new_height);

    let mut out = RgbImage::new(new_width, new_height);
    for (y, row_weights) in rows.iter().enumerate() {
        for (x, column_weights) in columns.iter().enumerate() {
            let mut acc = [0.0f64; 3];
            for &(sy, wy) in row_weights {
                for &(sx, wx) in column_weights {
                    let px = image.get_pixel(sx, sy).0;
                    let w = wx * wy;
                    for ch in 0..3 {
                        acc[ch] += px[ch] as f64 * w;
                    }
                }
            }
            let mut pixel = [0u8; 3];
            for ch in 0..3 {
                pixel[ch] = acc[ch].round().clamp(0.0, 255.0) as u8;
            }
            out.put_pixel(x as u32, y as u32, Rgb(pixel));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Distinct values at each corner: top-left=10, top-right=20,
    /// bottom-left=30, bottom-right=40.
    fn corner_image(width: u32, height: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([128, 128, 128]));
        img.put_pixel(0, 0, Rgb([10, 10, 10]));
        img.put_pixel(width - 1, 0, Rgb([20, 20, 20]));
        img.put_pixel(0, height - 1, Rgb([30, 30, 30]));
        img.put_pixel(width - 1, height - 1, Rgb([40, 40, 40]));
        img
    }

    #[test]
    fn screen_bounds_scale_monitor() {
        let bounds = ScreenBounds::from_display(1920, 1080, 0.9);
        assert_eq!(bounds, ScreenBounds::new(1728, 972));
    }

    #[test]
    fn rotate_minus_90_turns_clockwise() {
        let img = corner_image(3, 3);
        let rotated = rotate(&img, -90.0);
        assert_eq!(rotated.get_pixel(2, 0).0[0], 10);
        assert_eq!(rotated.get_pixel(2, 2).0[0], 20);
        assert_eq!(rotated.get_pixel(0, 0).0[0], 30);
        assert_eq!(rotated.get_pixel(0, 2).0[0], 40);
    }

    #[test]
    fn four_quarter_turns_preserve_dimensions() {
        for &(w, h) in &[(4, 4), (5, 3), (8, 6), (1, 7)] {
            let img = corner_image(w, h);
            let mut rotated = img.clone();
            for _ in 0..4 {
                rotated = rotate(&rotated, -90.0);
                assert_eq!(rotated.dimensions(), (w, h));
            }
        }
    }

    #[test]
    fn four_quarter_turns_restore_square_content() {
        let img = RgbImage::from_fn(6, 6, |x, y| Rgb([(x * 40) as u8, (y * 40) as u8, 7]));
        let mut rotated = img.clone();
        for _ in 0..4 {
            rotated = rotate(&rotated, -90.0);
        }
        assert_eq!(rotated, img);
    }

    #[test]
    fn rotation_fills_uncovered_corners_with_black() {
        let img = RgbImage::from_pixel(9, 9, Rgb([200, 200, 200]));
        let rotated = rotate(&img, 45.0);
        assert_eq!(rotated.dimensions(), (9, 9));
        assert_eq!(rotated.get_pixel(0, 0), &BACKGROUND);
        assert_eq!(rotated.get_pixel(4, 4), &Rgb([200, 200, 200]));
    }

    #[test]
    fn zero_rotation_is_identity() {
        let img = corner_image(5, 4);
        assert_eq!(rotate(&img, 0.0), img);
    }

    #[test]
    fn resize_keeps_fitting_image_unscaled() {
        let img = RgbImage::new(800, 600);
        let out = resize_to_fit(&img, ScreenBounds::new(1000, 1000));
        assert_eq!(out.dimensions(), (800, 600));
    }

    #[test]
    fn resize_halves_wide_image() {
        let img = RgbImage::new(2000, 1000);
        let out = resize_to_fit(&img, ScreenBounds::new(1000, 1000));
        assert_eq!(out.dimensions(), (1000, 500));
    }

    #[test]
    fn resize_never_exceeds_bounds() {
        let bounds = ScreenBounds::new(333, 127);
        for &(w, h) in &[(1000, 1000), (334, 10), (10, 500), (4000, 127), (333, 128)] {
            let out = resize_to_fit(&RgbImage::new(w, h), bounds);
            assert!(out.width() <= bounds.max_width, "{}x{}", w, h);
            assert!(out.height() <= bounds.max_height, "{}x{}", w, h);
            assert!(out.width() <= w && out.height() <= h);
        }
    }

    #[test]
    fn resize_averages_covered_area() {
        let img = RgbImage::from_fn(4, 2, |x, _| {
            if x % 2 == 0 {
                Rgb([0, 100, 200])
            } else {
                Rgb([100, 200, 0])
            }
        });
        let out = resize_to_fit(&img, ScreenBounds::new(2, 1));
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.get_pixel(0, 0), &Rgb([50, 150, 100]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([50, 150, 100]));
    }

    #[test]
    fn resize_preserves_uniform_color_with_fractional_ratio() {
        let img = RgbImage::from_pixel(7, 5, Rgb([12, 34, 56]));
        let out = resize_to_fit(&img, ScreenBounds::new(3, 3));
        assert_eq!(out.dimensions(), (3, 2));
        assert!(out.pixels().all(|p| *p == Rgb([12, 34, 56])));
    }
}
