//! Pixel buffers and regions of interest.

use image::RgbImage;

/// Position of each colour sample inside a stored 3-channel pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelOrder {
    red: usize,
    green: usize,
    blue: usize,
}

impl ChannelOrder {
    pub const RGB: ChannelOrder = ChannelOrder {
        red: 0,
        green: 1,
        blue: 2,
    };

    /// Returns `(r, g, b)` from a stored pixel.
    pub fn split(self, channels: &[u8; 3]) -> (u8, u8, u8) {
        (channels[self.red], channels[self.green], channels[self.blue])
    }
}

/// Channel order of every buffer owned by the session. The codec hands us
/// RGB samples and nothing reorders them afterwards.
pub const STORAGE_ORDER: ChannelOrder = ChannelOrder::RGB;

/// An image buffer owned by the session, tagged with a generation number
/// bumped each time the buffer is replaced.
pub struct Frame {
    pub image: RgbImage,
    pub generation: u64,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }
}

/// Rectangle in image pixel coordinates, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoiRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RoiRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle spanned by two drag corners, whatever the drag
    /// direction.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::new(
            a.0.min(b.0),
            a.1.min(b.1),
            a.0.abs_diff(b.0),
            a.1.abs_diff(b.1),
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersects the rectangle with an image of the given size.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Self {
        let x = self.x.min(image_width);
        let y = self.y.min(image_height);
        Self {
            x,
            y,
            width: self.width.min(image_width - x),
            height: self.height.min(image_height - y),
        }
    }
}

/// Copies the pixels under `roi` out of `image`. The rectangle is clamped to
/// the image first, so the result may be empty.
pub fn crop(image: &RgbImage, roi: RoiRect) -> RgbImage {
    let roi = roi.clamp_to(image.width(), image.height());
    image::imageops::crop_imm(image, roi.x, roi.y, roi.width, roi.height).to_image()
}

/// Converts a stored buffer into the display order used by the GUI. This is
/// the only place where storage order meets the screen.
pub fn to_color_image(image: &RgbImage) -> egui::ColorImage {
    let pixels = image
        .pixels()
        .map(|pixel| {
            let (r, g, b) = STORAGE_ORDER.split(&pixel.0);
            egui::Color32::from_rgb(r, g, b)
        })
        .collect();
    egui::ColorImage {
        size: [image.width() as usize, image.height() as usize],
        pixels,
    }
}
