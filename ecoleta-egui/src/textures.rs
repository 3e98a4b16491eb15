use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use ecoleta::map::DecodedImage;
use egui::{ColorImage, TextureHandle, TextureOptions};

struct Entry {
    handle: TextureHandle,
    last_used: u64,
}

/// Textures uploaded to the GPU for decoded images, keyed the same way as the images.
///
/// Textures not used during the last frame are dropped once there are more than `capacity`.
pub(crate) struct TextureStore<Key> {
    entries: HashMap<Key, Entry>,
    frame: u64,
    capacity: usize,
}

impl<Key: Eq + Hash + Clone + Debug> TextureStore<Key> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            frame: 0,
            capacity,
        }
    }

    /// Marks the start of a new frame and drops stale textures.
    pub fn begin_frame(&mut self) {
        if self.entries.len() > self.capacity {
            let frame = self.frame;
            self.entries.retain(|_, entry| entry.last_used >= frame);
            log::trace!("{} textures kept after eviction", self.entries.len());
        }

        self.frame += 1;
    }

    pub fn get_or_upload(
        &mut self,
        ctx: &egui::Context,
        key: &Key,
        image: &DecodedImage,
    ) -> &TextureHandle {
        let frame = self.frame;
        let entry = self.entries.entry(key.clone()).or_insert_with(|| {
            let color_image = ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.bytes(),
            );
            Entry {
                handle: ctx.load_texture(format!("{key:?}"), color_image, TextureOptions::LINEAR),
                last_used: frame,
            }
        });
        entry.last_used = frame;

        &entry.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> DecodedImage {
        DecodedImage::from_rgba(vec![255; 4], 1, 1).expect("1x1 rgba")
    }

    #[test]
    fn textures_are_reused_by_key() {
        let ctx = egui::Context::default();
        let mut store = TextureStore::new(4);

        store.begin_frame();
        let first = store.get_or_upload(&ctx, &"a", &image()).id();
        store.begin_frame();
        let second = store.get_or_upload(&ctx, &"a", &image()).id();

        assert_eq!(first, second);
    }

    #[test]
    fn unused_textures_are_dropped_past_capacity() {
        let ctx = egui::Context::default();
        let mut store = TextureStore::new(2);

        store.begin_frame();
        for key in ["a", "b", "c"] {
            store.get_or_upload(&ctx, &key, &image());
        }

        store.begin_frame();
        store.get_or_upload(&ctx, &"c", &image());
        assert_eq!(store.entries.len(), 3);

        store.begin_frame();
        assert_eq!(store.entries.len(), 1);
        assert!(store.entries.contains_key("c"));
    }

    #[test]
    fn nothing_is_dropped_within_capacity() {
        let ctx = egui::Context::default();
        let mut store = TextureStore::new(8);

        store.begin_frame();
        store.get_or_upload(&ctx, &"a", &image());
        for _ in 0..3 {
            store.begin_frame();
        }

        assert_eq!(store.entries.len(), 1);
    }
}
