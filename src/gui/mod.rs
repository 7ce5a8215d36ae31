use egui_winit_platform::{Platform, PlatformDescriptor};

use crate::errors::Error;
use crate::frame::{Frame, RoiRect};
use crate::session::{Session, SessionState};

mod roi_selector;
mod texture;
mod views;
mod windows;

use roi_selector::RoiSelector;
use texture::TextureSlot;
use windows::RoiAnalysisWindow;

pub use windows::figure_canvas_size;

/// What the user did through the GUI during one frame.
#[derive(Debug, Default, PartialEq)]
pub struct GuiOutput {
    /// Rectangle currently dragged over the image.
    pub selection: Option<RoiRect>,
    /// The analysis window was closed with its close button.
    pub analysis_closed: bool,
}

pub struct GUI {
    platform: Platform,
    render_pass: egui_wgpu_backend::RenderPass,
    textures_to_free: Option<egui::TexturesDelta>,

    image_texture: TextureSlot<u64>,
    roi_selector: RoiSelector,
    roi_analysis_window: RoiAnalysisWindow,
}

impl GUI {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
    ) -> Self {
        let platform = Platform::new(PlatformDescriptor {
            physical_width: surface_config.width,
            physical_height: surface_config.height,
            scale_factor: window.scale_factor(),
            font_definitions: egui::FontDefinitions::default(),
            style: Default::default(),
        });
        platform.context().set_visuals(egui::Visuals::light());

        GUI {
            platform,
            render_pass: egui_wgpu_backend::RenderPass::new(device, surface_config.format, 1),
            textures_to_free: None,

            image_texture: TextureSlot::new("image"),
            roi_selector: RoiSelector::new(),
            roi_analysis_window: RoiAnalysisWindow::new(),
        }
    }

    pub fn handle_event<T>(&mut self, winit_event: &winit::event::Event<T>) {
        self.platform.handle_event(winit_event);
    }

    pub fn update(&mut self, elapsed_seconds: f64) {
        self.platform.update_time(elapsed_seconds);
    }

    /// Draws the session into `view`. Textures released by this frame are
    /// kept until [`GUI::free_textures`] is called after submission.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        window: &winit::window::Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_config: &wgpu::SurfaceConfiguration,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        session: &Session,
    ) -> Result<GuiOutput, Error> {
        self.platform.begin_frame();
        let context = self.platform.context();
        let output = self.render_session(&context, session.state());

        let egui::FullOutput {
            textures_delta,
            shapes,
            ..
        } = self.platform.end_frame(Some(window));
        let paint_jobs = context.tessellate(shapes);

        let screen_descriptor = egui_wgpu_backend::ScreenDescriptor {
            physical_width: surface_config.width,
            physical_height: surface_config.height,
            scale_factor: window.scale_factor() as f32,
        };

        self.render_pass
            .add_textures(device, queue, &textures_delta)
            .map_err(|e| Error::Render(format!("{:?}", e)))?;
        self.render_pass
            .update_buffers(device, queue, &paint_jobs, &screen_descriptor);
        self.render_pass
            .execute(
                encoder,
                view,
                &paint_jobs,
                &screen_descriptor,
                Some(wgpu::Color::BLACK),
            )
            .map_err(|e| Error::Render(format!("{:?}", e)))?;
        self.textures_to_free = Some(textures_delta);

        Ok(output)
    }

    pub fn free_textures(&mut self) -> Result<(), Error> {
        if let Some(textures_delta) = self.textures_to_free.take() {
            self.render_pass
                .remove_textures(textures_delta)
                .map_err(|e| Error::Render(format!("{:?}", e)))?;
        }
        Ok(())
    }

    /// Releases every texture held for the session.
    pub fn teardown(&mut self) {
        self.image_texture.clear();
        self.roi_analysis_window.clear();
        self.roi_selector.reset();
    }

    fn render_session(&mut self, context: &egui::Context, state: &SessionState) -> GuiOutput {
        let mut output = GuiOutput::default();
        let canvas = egui::Frame::none().fill(egui::Color32::BLACK);

        egui::CentralPanel::default().frame(canvas).show(context, |ui| {
            let pixels_per_point = ui.ctx().pixels_per_point();
            match state {
                SessionState::NoImage { diagnostic } => {
                    self.image_texture.clear();
                    self.roi_selector.reset();
                    views::paint_placeholder(
                        ui.painter(),
                        ui.max_rect().min,
                        pixels_per_point,
                        diagnostic.as_deref(),
                    );
                }
                SessionState::Viewing(frame) => {
                    self.roi_selector.reset();
                    let response = self.paint_frame(ui, frame, egui::Sense::hover());
                    views::paint_key_legend(ui.painter(), response.rect.min, pixels_per_point);
                }
                SessionState::SelectingRoi(frame, selection) => {
                    let response = self.paint_frame(ui, frame, egui::Sense::drag());
                    output.selection = self.roi_selector.update(&response, frame.size());
                    let shown = output.selection.unwrap_or(*selection);
                    views::paint_selection(ui.painter(), response.rect, frame.size(), shown);
                    views::paint_selection_hint(ui.painter(), response.rect.min, pixels_per_point);
                }
                SessionState::Analyzing(frame, _) => {
                    self.paint_frame(ui, frame, egui::Sense::hover());
                }
                SessionState::Quit => {}
            }
        });

        match state {
            SessionState::Analyzing(frame, analysis) => {
                output.analysis_closed =
                    !self
                        .roi_analysis_window
                        .render(context, frame.generation, analysis);
            }
            _ => self.roi_analysis_window.clear(),
        }
        output
    }

    fn paint_frame(&mut self, ui: &mut egui::Ui, frame: &Frame, sense: egui::Sense) -> egui::Response {
        let texture = self
            .image_texture
            .get_or_upload(ui.ctx(), frame.generation, &frame.image);
        views::paint_image(ui, &texture, frame.size(), sense)
    }
}
