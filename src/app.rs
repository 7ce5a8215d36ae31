use std::time::Instant;

use log::{info, warn};
use winit::dpi::PhysicalSize;

use crate::commands::Command;
use crate::errors::Error;
use crate::gui::{self, GUI};
use crate::input_manager::InputManager;
use crate::loaders::{ImageSource, NativeImageSource};
use crate::session::{Session, SessionState, Transition};
use crate::settings::Settings;

pub struct Platform {
    pub device: wgpu::Device,
    pub window: winit::window::Window,
    pub surface: wgpu::Surface,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
}

/// What the canvas was last sized for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Canvas {
    Placeholder,
    Frame(u64),
    Figure(u64),
}

/// Canvas and physical window size for `state`; `None` once the session is
/// over.
fn canvas_for(
    state: &SessionState,
    placeholder_size: (u32, u32),
    pixels_per_point: f32,
) -> Option<(Canvas, (u32, u32))> {
    match state {
        SessionState::Quit => None,
        SessionState::NoImage { .. } => Some((Canvas::Placeholder, placeholder_size)),
        SessionState::Analyzing(frame, _) => Some((
            Canvas::Figure(frame.generation),
            gui::figure_canvas_size((frame.width(), frame.height()), pixels_per_point),
        )),
        SessionState::Viewing(frame) | SessionState::SelectingRoi(frame, _) => Some((
            Canvas::Frame(frame.generation),
            (frame.width(), frame.height()),
        )),
    }
}

pub struct ApplicationContext {
    pub platform: Platform,
    pub gui: GUI,
    pub session: Session,
    pub settings: Settings,
    pub input_manager: InputManager,

    image_source: Box<dyn ImageSource>,
    canvas: Option<Canvas>,
    start_time: Instant,
    exiting: bool,
    torn_down: bool,
}

impl ApplicationContext {
    pub fn new(platform: Platform, settings: Settings, session: Session) -> Self {
        let gui = GUI::new(&platform.window, &platform.device, &platform.surface_config);
        let mut app_context = ApplicationContext {
            platform,
            gui,
            session,
            settings,
            input_manager: InputManager::new(),

            image_source: Box::new(NativeImageSource::new()),
            canvas: None,
            start_time: Instant::now(),
            exiting: false,
            torn_down: false,
        };
        app_context.sync_window_size();
        app_context
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn request_exit(&mut self) {
        self.exiting = true;
    }

    pub fn run_command(&mut self, command: Command) {
        if self.session.handle(command, self.image_source.as_mut()) == Transition::Exit {
            self.exiting = true;
        }
        self.sync_window_size();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.platform.surface_config.width = width;
        self.platform.surface_config.height = height;
        self.platform
            .surface
            .configure(&self.platform.device, &self.platform.surface_config);
    }

    pub fn redraw(&mut self) -> Result<(), Error> {
        let frame = match self.platform.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.platform
                    .surface
                    .configure(&self.platform.device, &self.platform.surface_config);
                return Ok(());
            }
            Err(e) => {
                warn!("Dropped frame: {:?}", e);
                return Ok(());
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.platform
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("GUI Encoder"),
                });

        self.gui.update(self.start_time.elapsed().as_secs_f64());
        let output = self.gui.render(
            &self.platform.window,
            &self.platform.device,
            &self.platform.queue,
            &self.platform.surface_config,
            &mut encoder,
            &view,
            &self.session,
        )?;
        self.platform.queue.submit(Some(encoder.finish()));
        frame.present();
        self.gui.free_textures()?;

        if let Some(selection) = output.selection {
            self.session.update_selection(selection);
        }
        if output.analysis_closed {
            self.session.dismiss_analysis();
            self.sync_window_size();
        }
        Ok(())
    }

    /// Releases the image buffers and their textures. Runs once, whichever
    /// way the loop ended.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.session.teardown();
        self.gui.teardown();
        self.platform.window.set_visible(false);
        info!("Display resources released");
    }

    /// Matches the window to the displayed buffer, to the prompt canvas when
    /// there is none, or to the analysis figure while it is shown. Only
    /// resizes when one of those changed.
    fn sync_window_size(&mut self) {
        let pixels_per_point = self.platform.window.scale_factor() as f32;
        let (canvas, (width, height)) = match canvas_for(
            self.session.state(),
            self.settings.placeholder_size,
            pixels_per_point,
        ) {
            Some(target) => target,
            None => return,
        };
        if self.canvas == Some(canvas) {
            return;
        }
        self.canvas = Some(canvas);
        self.platform
            .window
            .set_inner_size(PhysicalSize::new(width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RoiAnalysis;
    use crate::frame::{Frame, RoiRect};
    use image::RgbImage;

    fn frame(width: u32, height: u32) -> Frame {
        Frame {
            image: RgbImage::new(width, height),
            generation: 3,
        }
    }

    #[test]
    fn prompt_uses_placeholder_canvas() {
        let state = SessionState::NoImage { diagnostic: None };
        assert_eq!(
            canvas_for(&state, (500, 300), 1.0),
            Some((Canvas::Placeholder, (500, 300)))
        );
    }

    #[test]
    fn viewing_and_selecting_match_the_frame() {
        let viewing = SessionState::Viewing(frame(400, 300));
        assert_eq!(
            canvas_for(&viewing, (500, 300), 1.0),
            Some((Canvas::Frame(3), (400, 300)))
        );
        let selecting = SessionState::SelectingRoi(frame(400, 300), RoiRect::default());
        assert_eq!(
            canvas_for(&selecting, (500, 300), 1.0),
            Some((Canvas::Frame(3), (400, 300)))
        );
    }

    #[test]
    fn small_frame_grows_while_analysing_and_shrinks_back() {
        let small = frame(400, 300);
        let analysis = RoiAnalysis::new(&small.image, RoiRect::new(10, 10, 50, 40)).unwrap();
        let analysing = SessionState::Analyzing(small, analysis);

        let (canvas, size) = canvas_for(&analysing, (500, 300), 1.0).unwrap();
        assert_eq!(canvas, Canvas::Figure(3));
        assert_eq!(size, gui::figure_canvas_size((400, 300), 1.0));
        assert!(size.0 > 400 && size.1 > 300);

        let dismissed = SessionState::Viewing(frame(400, 300));
        let (canvas, size) = canvas_for(&dismissed, (500, 300), 1.0).unwrap();
        assert_ne!(canvas, Canvas::Figure(3));
        assert_eq!(size, (400, 300));
    }

    #[test]
    fn finished_session_keeps_the_window() {
        assert_eq!(canvas_for(&SessionState::Quit, (500, 300), 1.0), None);
    }
}
