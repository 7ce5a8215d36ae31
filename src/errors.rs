use image::ImageError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("failed to decode image: {0}")]
    ImageError(#[from] ImageError),

    #[error("no monitor detected")]
    NoMonitor,

    #[error("no suitable GPU adapter found on the system")]
    NoAdapter,

    #[error("surface is incompatible with the adapter")]
    IncompatibleSurface,

    #[error("unable to request a GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to render GUI: {0}")]
    Render(String),
}

impl From<Error> for String {
    fn from(e: Error) -> Self {
        match e {
            Error::FileNotFound(filename) => {
                format!("Failed to load image: file not found: {}", filename)
            }
            Error::ImageError(e) => format!("Failed to load image: {}", e),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_names_missing_file() {
        let message = String::from(Error::FileNotFound("/tmp/nope.png".into()));
        assert_eq!(message, "Failed to load image: file not found: /tmp/nope.png");
    }

    #[test]
    fn diagnostic_falls_back_to_display() {
        let message = String::from(Error::NoMonitor);
        assert_eq!(message, "no monitor detected");
    }
}
