//! Keyboard-driven session over a single image.
//!
//! The session owns the current buffer and moves between the states below
//! on every [`Command`]:
//!
//! - `NoImage`: waiting for `Load` (opens the picker) or `Quit`.
//! - `Viewing`: `Rotate` replaces the buffer, `SelectRoi` starts a selection,
//!   `Load` drops the buffer, `Quit` ends the session.
//! - `SelectingRoi`: the GUI feeds the dragged rectangle in; `Confirm`
//!   analyses it unless it is degenerate, `Cancel`/`Escape` go back.
//! - `Analyzing`: the figure is modal; any dismissal returns to `Viewing`.
//! - `Quit`: terminal.

use log::{debug, error, info};

use crate::analysis::RoiAnalysis;
use crate::commands::Command;
use crate::frame::{Frame, RoiRect};
use crate::geometry::{self, ScreenBounds};
use crate::loaders::ImageSource;

pub enum SessionState {
    NoImage { diagnostic: Option<String> },
    Viewing(Frame),
    SelectingRoi(Frame, RoiRect),
    Analyzing(Frame, RoiAnalysis),
    Quit,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::NoImage { .. } => "NoImage",
            SessionState::Viewing(_) => "Viewing",
            SessionState::SelectingRoi(..) => "SelectingRoi",
            SessionState::Analyzing(..) => "Analyzing",
            SessionState::Quit => "Quit",
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        match self {
            SessionState::Viewing(frame)
            | SessionState::SelectingRoi(frame, _)
            | SessionState::Analyzing(frame, _) => Some(frame),
            SessionState::NoImage { .. } | SessionState::Quit => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Exit,
}

pub struct Session {
    state: SessionState,
    bounds: ScreenBounds,
    rotation_step: f64,
    next_generation: u64,
}

impl Session {
    pub fn new(bounds: ScreenBounds, rotation_step: f64) -> Self {
        Self {
            state: SessionState::NoImage { diagnostic: None },
            bounds,
            rotation_step,
            next_generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Quit)
    }

    pub fn handle(&mut self, command: Command, source: &mut dyn ImageSource) -> Transition {
        let current = std::mem::replace(&mut self.state, SessionState::Quit);
        let from = current.name();
        self.state = self.next(current, command, source);
        debug!("{:?}: {} -> {}", command, from, self.state.name());

        if self.is_finished() {
            Transition::Exit
        } else {
            Transition::Continue
        }
    }

    /// Replaces the rectangle being dragged. Ignored outside a selection.
    pub fn update_selection(&mut self, rect: RoiRect) {
        if let SessionState::SelectingRoi(_, selection) = &mut self.state {
            *selection = rect;
        }
    }

    /// Closes the analysis figure, if one is shown.
    pub fn dismiss_analysis(&mut self) {
        self.state = match std::mem::replace(&mut self.state, SessionState::Quit) {
            SessionState::Analyzing(frame, _) => SessionState::Viewing(frame),
            other => other,
        };
    }

    /// Drops the image and ends the session. Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.is_finished() {
            debug!("Session torn down from {}", self.state.name());
        }
        self.state = SessionState::Quit;
    }

    fn next(
        &mut self,
        state: SessionState,
        command: Command,
        source: &mut dyn ImageSource,
    ) -> SessionState {
        match (state, command) {
            (SessionState::Quit, _) => SessionState::Quit,

            (SessionState::NoImage { .. }, Command::Load) => self.acquire(source),
            (SessionState::NoImage { .. }, Command::Quit | Command::Escape) => SessionState::Quit,

            (SessionState::Viewing(frame), Command::Rotate) => {
                let rotated = geometry::rotate(&frame.image, self.rotation_step);
                SessionState::Viewing(self.frame(geometry::resize_to_fit(&rotated, self.bounds)))
            }
            (SessionState::Viewing(frame), Command::SelectRoi) => {
                info!("Select a ROI and then press SPACE or ENTER button!");
                info!("Cancel the selection process by pressing c button!");
                SessionState::SelectingRoi(frame, RoiRect::default())
            }
            (SessionState::Viewing(_), Command::Load) => SessionState::NoImage { diagnostic: None },
            (SessionState::Viewing(_), Command::Quit | Command::Escape) => SessionState::Quit,

            (SessionState::SelectingRoi(frame, selection), Command::Confirm) => {
                match RoiAnalysis::new(&frame.image, selection) {
                    Some(analysis) => {
                        info!(
                            "Analysing ROI x={} y={} {}x{}",
                            analysis.roi.x, analysis.roi.y, analysis.roi.width, analysis.roi.height
                        );
                        SessionState::Analyzing(frame, analysis)
                    }
                    None => {
                        debug!("Discarding empty ROI selection");
                        SessionState::Viewing(frame)
                    }
                }
            }
            (SessionState::SelectingRoi(frame, _), Command::Cancel | Command::Escape) => {
                debug!("ROI selection cancelled");
                SessionState::Viewing(frame)
            }

            (
                SessionState::Analyzing(frame, _),
                Command::Quit | Command::Escape | Command::Confirm,
            ) => SessionState::Viewing(frame),

            (state, _) => state,
        }
    }

    fn acquire(&mut self, source: &mut dyn ImageSource) -> SessionState {
        let path = match source.pick_path() {
            Some(path) => path,
            None => {
                info!("No image selected");
                return SessionState::NoImage { diagnostic: None };
            }
        };

        match source.decode(&path) {
            Ok(image) => {
                info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                SessionState::Viewing(self.frame(geometry::resize_to_fit(&image, self.bounds)))
            }
            Err(e) => {
                let diagnostic = String::from(e);
                error!("{}", diagnostic);
                SessionState::NoImage {
                    diagnostic: Some(diagnostic),
                }
            }
        }
    }

    fn frame(&mut self, image: image::RgbImage) -> Frame {
        let generation = self.next_generation;
        self.next_generation += 1;
        Frame { image, generation }
    }
}
