use egui::plot::{Corner, Legend, Line, Plot, Points, Value, Values};
use egui::Color32;

use crate::analysis::{ColumnProfile, RoiAnalysis};
use crate::frame::RoiRect;
use crate::gui::texture::TextureSlot;
use crate::gui::views;

const FIGURE_WIDTH: f32 = 640.0;
const CROP_MAX_HEIGHT: f32 = 240.0;
const PLOT_HEIGHT: f32 = 280.0;
// Title bar, both headings, the region line, captions, hint and spacing.
const FIGURE_CHROME_HEIGHT: f32 = 220.0;
const WINDOW_FRAME: f32 = 16.0;
const CANVAS_MARGIN: f32 = 16.0;

/// Physical size the main window needs while the figure is shown: the frame
/// itself, grown so the whole figure fits around it.
pub fn figure_canvas_size(frame_size: (u32, u32), pixels_per_point: f32) -> (u32, u32) {
    let needed = |points: f32| (points * pixels_per_point.max(f32::EPSILON)).ceil() as u32;
    let width = needed(FIGURE_WIDTH + 2.0 * (WINDOW_FRAME + CANVAS_MARGIN));
    let height = needed(
        CROP_MAX_HEIGHT + PLOT_HEIGHT + FIGURE_CHROME_HEIGHT + 2.0 * (WINDOW_FRAME + CANVAS_MARGIN),
    );
    (frame_size.0.max(width), frame_size.1.max(height))
}

/// The figure shown after a selection is confirmed: the cropped region on
/// top, its column profile below.
pub struct RoiAnalysisWindow {
    crop_texture: TextureSlot<(u64, RoiRect)>,
}

impl RoiAnalysisWindow {
    pub fn new() -> Self {
        RoiAnalysisWindow {
            crop_texture: TextureSlot::new("roi_crop"),
        }
    }

    pub fn clear(&mut self) {
        self.crop_texture.clear();
    }

    /// Returns `false` once the window's close button was pressed.
    pub fn render(
        &mut self,
        context: &egui::Context,
        generation: u64,
        analysis: &RoiAnalysis,
    ) -> bool {
        let texture =
            self.crop_texture
                .get_or_upload(context, (generation, analysis.roi), &analysis.cropped);
        let roi = analysis.roi;
        let crop_size = fit_within(roi.width, roi.height, FIGURE_WIDTH, CROP_MAX_HEIGHT);

        let mut open = true;
        egui::Window::new("ROI Analysis")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .default_width(FIGURE_WIDTH)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(context, |ui| {
                ui.vertical(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Selected ROI");
                        ui.image(texture.id(), crop_size);
                    });
                    views::render_label_and_text(
                        ui,
                        "Region:",
                        format!(
                            "x={}, y={}, width={}, height={}",
                            roi.x, roi.y, roi.width, roi.height
                        ),
                    );
                    ui.separator();
                    ui.vertical_centered(|ui| {
                        ui.heading("Color Intensity Across ROI Width");
                    });
                    render_profile_plot(ui, &analysis.profile);
                    ui.horizontal(|ui| {
                        ui.label("x: Pixel Column Index (px)");
                        ui.separator();
                        ui.label("y: Average Intensity (0-255)");
                    });
                    ui.small("Press 'q', ESC, SPACE or ENTER to close");
                });
            });
        open
    }
}

fn render_profile_plot(ui: &mut egui::Ui, profile: &ColumnProfile) {
    let series = [
        ("Red", Color32::RED, &profile.red),
        ("Green", Color32::GREEN, &profile.green),
        ("Blue", Color32::BLUE, &profile.blue),
        ("Mean RGB Intensity", Color32::BLACK, &profile.intensity),
    ];
    // A line needs two points; a one-column region is plotted as markers.
    let single_column = profile.intensity.len() == 1;

    Plot::new("roi_profile")
        .height(PLOT_HEIGHT)
        .legend(Legend::default().position(Corner::LeftTop))
        .include_x(0.0)
        .include_y(0.0)
        .include_y(255.0)
        .show(ui, |plot_ui| {
            for (name, color, samples) in series {
                let values = Values::from_values_iter(
                    samples
                        .iter()
                        .enumerate()
                        .map(|(column, mean)| Value::new(column as f64, *mean)),
                );
                if single_column {
                    plot_ui.points(Points::new(values).color(color).radius(3.0).name(name));
                } else {
                    plot_ui.line(Line::new(values).color(color).name(name));
                }
            }
        });
}

/// Largest size with the aspect ratio of `width x height` that fits in
/// `max_width x max_height`.
fn fit_within(width: u32, height: u32, max_width: f32, max_height: f32) -> egui::Vec2 {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let scale = (max_width / w).min(max_height / h);
    egui::vec2(w * scale, h * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_preview_keeps_aspect_ratio() {
        let size = fit_within(100, 50, 640.0, 240.0);
        assert_eq!(size, egui::vec2(480.0, 240.0));

        let wide = fit_within(1280, 10, 640.0, 240.0);
        assert_eq!(wide, egui::vec2(640.0, 5.0));
    }

    #[test]
    fn small_frame_grows_to_hold_the_figure() {
        let (width, height) = figure_canvas_size((400, 300), 1.0);
        assert!(width as f32 >= FIGURE_WIDTH + 2.0 * WINDOW_FRAME);
        assert!(height as f32 >= CROP_MAX_HEIGHT + PLOT_HEIGHT + FIGURE_CHROME_HEIGHT);
    }

    #[test]
    fn large_frame_is_kept() {
        assert_eq!(figure_canvas_size((1600, 1200), 1.0), (1600, 1200));
    }

    #[test]
    fn figure_size_follows_scale_factor() {
        let (w1, h1) = figure_canvas_size((1, 1), 1.0);
        let (w2, h2) = figure_canvas_size((1, 1), 2.0);
        assert_eq!((w2, h2), (w1 * 2, h1 * 2));
    }
}
