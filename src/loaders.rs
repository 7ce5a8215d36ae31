use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::errors::Error;

/// Extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "hdr",
];

/// Where the session gets its images from: a picker that may return a
/// path, and a codec turning that path into a buffer.
pub trait ImageSource {
    fn pick_path(&mut self) -> Option<PathBuf>;

    fn decode(&mut self, path: &Path) -> Result<RgbImage, Error>;
}

/// Native dialog and on-disk codec.
#[derive(Default)]
pub struct NativeImageSource {}

impl NativeImageSource {
    pub fn new() -> Self {
        Self {}
    }
}

impl ImageSource for NativeImageSource {
    fn pick_path(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select an image file:")
            .add_filter("image", IMAGE_EXTENSIONS)
            .pick_file()
    }

    fn decode(&mut self, path: &Path) -> Result<RgbImage, Error> {
        load_image(path)
    }
}

pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, Error> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let image = image::open(path)?;
    Ok(image.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        match load_image(&path) {
            Err(Error::FileNotFound(name)) => assert!(name.ends_with("missing.png")),
            other => panic!("unexpected result: {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn directory_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_image(dir.path()), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load_image(&path), Err(Error::ImageError(_))));
    }

    #[test]
    fn png_is_decoded_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        let mut source = RgbImage::new(3, 2);
        source.put_pixel(2, 1, Rgb([9, 8, 7]));
        source.save(&path).unwrap();

        let decoded = NativeImageSource::new().decode(&path).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgb([9, 8, 7]));
    }
}
