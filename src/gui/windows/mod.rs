mod roi_analysis;

pub use roi_analysis::{figure_canvas_size, RoiAnalysisWindow};
