use image::RgbImage;

use crate::frame;

/// One GPU texture tied to the buffer it was uploaded from. The upload is
/// redone only when the key changes.
pub struct TextureSlot<K> {
    name: &'static str,
    key: Option<K>,
    handle: Option<egui::TextureHandle>,
}

impl<K: Copy + PartialEq> TextureSlot<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            handle: None,
        }
    }

    pub fn get_or_upload(
        &mut self,
        context: &egui::Context,
        key: K,
        image: &RgbImage,
    ) -> egui::TextureHandle {
        if let (Some(current), Some(handle)) = (self.key, &self.handle) {
            if current == key {
                return handle.clone();
            }
        }
        let handle = context.load_texture(self.name, frame::to_color_image(image));
        self.key = Some(key);
        self.handle = Some(handle.clone());
        handle
    }

    /// Drops the texture; egui frees it at the end of the next frame.
    pub fn clear(&mut self) {
        self.key = None;
        self.handle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_is_reused_until_key_changes() {
        let context = egui::Context::default();
        let image = RgbImage::new(4, 4);
        let mut slot = TextureSlot::new("test");

        let first = slot.get_or_upload(&context, 1u64, &image).id();
        let again = slot.get_or_upload(&context, 1u64, &image).id();
        assert_eq!(first, again);

        let replaced = slot.get_or_upload(&context, 2u64, &image).id();
        assert_ne!(first, replaced);

        slot.clear();
        let reloaded = slot.get_or_upload(&context, 2u64, &image).id();
        assert_ne!(replaced, reloaded);
    }
}
