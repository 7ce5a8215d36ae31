use std::time::Duration;

pub struct Settings {
    pub window_title: &'static str,
    /// Fraction of the primary monitor the image may cover.
    pub screen_fraction: f64,
    pub poll_interval: Duration,
    /// Size of the load-prompt canvas, in pixels.
    pub placeholder_size: (u32, u32),
    /// Degrees applied on each rotate key-press.
    pub rotation_step: f64,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            window_title: "Image",
            screen_fraction: 0.9,
            poll_interval: Duration::from_millis(100),
            placeholder_size: (500, 300),
            rotation_step: -90.0,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
