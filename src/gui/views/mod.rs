//! Painting helpers shared by the main canvas and the windows.
//!
//! Positions given in image pixels are converted to egui points through the
//! rectangle the image occupies, so overlays stay aligned whatever the
//! display scale factor.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, Ui};

use crate::frame::RoiRect;

pub const PLACEHOLDER_TEXT: &str = "Press 'n' to load image";

pub const KEY_LEGEND: [&str; 4] = [
    "Press 'r' to rotate",
    "Press 's' to select ROI",
    "Press 'n' to load new image",
    "Press 'q' or ESC to quit",
];

pub const SELECTION_HINT: &str = "Drag to select, SPACE or ENTER to confirm, 'c' to cancel";

const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 120, 255);

pub fn render_label_and_text<L: AsRef<str>, T: AsRef<str>>(ui: &mut Ui, label: L, text: T) {
    ui.horizontal(|ui| {
        ui.label(label.as_ref());
        ui.label(text.as_ref());
    });
}

/// Offset of `(x, y)` canvas pixels from `origin`, in points.
fn at(origin: Pos2, pixels_per_point: f32, x: f32, y: f32) -> Pos2 {
    origin + egui::vec2(x / pixels_per_point, y / pixels_per_point)
}

/// Allocates the image at one screen pixel per image pixel and paints it.
pub fn paint_image(
    ui: &mut Ui,
    texture: &egui::TextureHandle,
    size: [usize; 2],
    sense: Sense,
) -> Response {
    let pixels_per_point = ui.ctx().pixels_per_point();
    let desired = egui::vec2(
        size[0] as f32 / pixels_per_point,
        size[1] as f32 / pixels_per_point,
    );
    let (rect, response) = ui.allocate_exact_size(desired, sense);
    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    let mut mesh = egui::epaint::Mesh::with_texture(texture.id());
    mesh.add_rect_with_uv(rect, uv, Color32::WHITE);
    ui.painter().add(egui::Shape::mesh(mesh));
    response
}

/// The "load an image" prompt drawn while nothing is displayed, followed by
/// the last load failure if there was one.
pub fn paint_placeholder(
    painter: &Painter,
    origin: Pos2,
    pixels_per_point: f32,
    diagnostic: Option<&str>,
) {
    painter.text(
        at(origin, pixels_per_point, 50.0, 150.0),
        Align2::LEFT_BOTTOM,
        PLACEHOLDER_TEXT,
        FontId::proportional(18.0),
        Color32::WHITE,
    );
    if let Some(diagnostic) = diagnostic {
        painter.text(
            at(origin, pixels_per_point, 50.0, 185.0),
            Align2::LEFT_BOTTOM,
            diagnostic,
            FontId::proportional(12.0),
            Color32::from_rgb(255, 90, 90),
        );
    }
}

/// Black box with the key bindings in the top-left corner of the image.
pub fn paint_key_legend(painter: &Painter, origin: Pos2, pixels_per_point: f32) {
    painter.rect_filled(
        Rect::from_min_max(
            at(origin, pixels_per_point, 10.0, 10.0),
            at(origin, pixels_per_point, 360.0, 120.0),
        ),
        0.0,
        Color32::BLACK,
    );
    for (i, line) in KEY_LEGEND.iter().enumerate() {
        painter.text(
            at(origin, pixels_per_point, 20.0, 40.0 + 20.0 * i as f32),
            Align2::LEFT_BOTTOM,
            line,
            FontId::proportional(14.0),
            Color32::WHITE,
        );
    }
}

pub fn paint_selection_hint(painter: &Painter, origin: Pos2, pixels_per_point: f32) {
    let galley = painter.layout_no_wrap(
        SELECTION_HINT.to_owned(),
        FontId::proportional(14.0),
        Color32::WHITE,
    );
    let min = at(origin, pixels_per_point, 10.0, 10.0);
    let background = Rect::from_min_size(min, galley.size() + egui::vec2(12.0, 8.0));
    painter.rect_filled(background, 0.0, Color32::from_black_alpha(200));
    painter.galley(min + egui::vec2(6.0, 4.0), galley);
}

/// Outlines `roi` on an image painted into `image_rect`.
pub fn paint_selection(painter: &Painter, image_rect: Rect, size: [usize; 2], roi: RoiRect) {
    if roi.is_degenerate() {
        return;
    }
    let min = pixel_to_point(image_rect, (roi.x, roi.y), size);
    let max = pixel_to_point(image_rect, (roi.x + roi.width, roi.y + roi.height), size);
    painter.rect_stroke(
        Rect::from_min_max(min, max),
        0.0,
        Stroke::new(2.0, SELECTION_COLOR),
    );
}

/// Maps a pointer position over `image_rect` to the nearest pixel boundary
/// of an image of `size`, clamped to the image.
pub fn pointer_to_pixel(image_rect: Rect, pos: Pos2, size: [usize; 2]) -> (u32, u32) {
    let fraction = |value: f32, min: f32, extent: f32| {
        if extent <= 0.0 {
            0.0
        } else {
            ((value - min) / extent).clamp(0.0, 1.0)
        }
    };
    let u = fraction(pos.x, image_rect.min.x, image_rect.width());
    let v = fraction(pos.y, image_rect.min.y, image_rect.height());
    (
        (u * size[0] as f32).round() as u32,
        (v * size[1] as f32).round() as u32,
    )
}

pub fn pixel_to_point(image_rect: Rect, pixel: (u32, u32), size: [usize; 2]) -> Pos2 {
    let sx = image_rect.width() / size[0].max(1) as f32;
    let sy = image_rect.height() / size[1].max(1) as f32;
    image_rect.min + egui::vec2(pixel.0 as f32 * sx, pixel.1 as f32 * sy)
}
