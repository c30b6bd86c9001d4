use std::collections::{HashMap, HashSet};

use egui::load::{SizeHint, TexturePoll};
use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::catalog::ImageSource;

/// Errors that can occur while turning an illustration into a texture
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("image source is a URL and is loaded by the context's image loaders: {0}")]
    RemoteSource(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Identifies one version of an illustration's pixels without hashing the
/// full payload every frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TextureKey {
    theme_id: String,
    len: usize,
    head: u64,
    tail: u64,
}

impl TextureKey {
    fn new(theme_id: &str, source: &ImageSource) -> Self {
        let (len, head, tail) = match source {
            ImageSource::Embedded { bytes, .. } => {
                let n = bytes.len().min(1024);
                (bytes.len(), fnv(&bytes[..n]), fnv(&bytes[bytes.len() - n..]))
            }
            ImageSource::Url(url) => (url.len(), fnv(url.as_bytes()), 0),
        };
        Self {
            theme_id: theme_id.to_owned(),
            len,
            head,
            tail,
        }
    }
}

fn fnv(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0xcbf2_9ce4_8422_2325u64, |h, b| (h ^ *b as u64).wrapping_mul(0x0100_0000_01b3))
}

/// Decode embedded illustration bytes into an egui image
pub fn decode_illustration(source: &ImageSource) -> Result<ColorImage, TextureError> {
    match source {
        ImageSource::Embedded { bytes, .. } => {
            let image = image::load_from_memory(bytes)?;
            let size = [image.width() as usize, image.height() as usize];
            let rgba = image.to_rgba8();
            Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
        }
        ImageSource::Url(url) => Err(TextureError::RemoteSource(url.clone())),
    }
}

/// Caches decoded background textures, evicting the least recently used.
/// URL sources go through the image loaders installed on the context, which
/// keep their own cache.
pub struct BackgroundTextures {
    cache: HashMap<TextureKey, TextureHandle>,
    last_used: HashMap<TextureKey, u64>,
    /// Sources that failed once are not retried every frame
    failed: HashSet<TextureKey>,
    current_frame: u64,
    max_cache_size: usize,
}

impl std::fmt::Debug for BackgroundTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundTextures")
            .field("cached", &self.cache.len())
            .field("failed", &self.failed.len())
            .field("current_frame", &self.current_frame)
            .finish()
    }
}

impl Default for BackgroundTextures {
    fn default() -> Self {
        Self::new(4)
    }
}

impl BackgroundTextures {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            last_used: HashMap::new(),
            failed: HashSet::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Call once per frame before [`Self::get`]
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for an illustration, decoding it on first use. `None` while a
    /// remote image is still loading, or when the source cannot be turned
    /// into pixels.
    pub fn get(&mut self, ctx: &Context, theme_id: &str, source: &ImageSource) -> Option<TextureId> {
        let key = TextureKey::new(theme_id, source);
        if let Some(handle) = self.cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return Some(handle.id());
        }
        if self.failed.contains(&key) {
            return None;
        }

        match decode_illustration(source) {
            Ok(image) => {
                self.evict_until_room();
                let handle = ctx.load_texture(format!("illustration_{theme_id}"), image, TextureOptions::LINEAR);
                let id = handle.id();
                self.cache.insert(key.clone(), handle);
                self.last_used.insert(key, self.current_frame);
                Some(id)
            }
            Err(TextureError::RemoteSource(url)) => {
                match ctx.try_load_texture(&url, TextureOptions::LINEAR, SizeHint::default()) {
                    Ok(TexturePoll::Ready { texture }) => Some(texture.id),
                    Ok(TexturePoll::Pending { .. }) => None,
                    Err(err) => {
                        log::warn!("Failed to load illustration {theme_id} from {url}: {err}");
                        self.failed.insert(key);
                        None
                    }
                }
            }
            Err(err) => {
                log::error!("Failed to decode illustration {theme_id}: {err}");
                self.failed.insert(key);
                None
            }
        }
    }

    fn evict_until_room(&mut self) {
        while self.cache.len() >= self.max_cache_size {
            let Some(oldest) = self
                .last_used
                .iter()
                .min_by_key(|(_, frame)| **frame)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            self.cache.remove(&oldest);
            self.last_used.remove(&oldest);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.last_used.clear();
        self.failed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_source(shade: u8) -> ImageSource {
        let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([shade, 0, 0, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        ImageSource::embedded("image/png", bytes)
    }

    #[test]
    fn decodes_embedded_png() {
        let image = decode_illustration(&png_source(10)).unwrap();
        assert_eq!(image.size, [2, 3]);
    }

    #[test]
    fn cache_hit_reuses_texture() {
        let ctx = Context::default();
        let mut textures = BackgroundTextures::new(4);
        let source = png_source(1);

        let a = textures.get(&ctx, "custom", &source).unwrap();
        let b = textures.get(&ctx, "custom", &source).unwrap();
        assert_eq!(a, b);
        assert_eq!(textures.cache_size(), 1);
    }

    #[test]
    fn url_sources_go_through_the_context_loaders() {
        let ctx = Context::default();
        let mut textures = BackgroundTextures::default();
        let source = ImageSource::Url("https://example.com/x.png".into());

        // No loaders installed, so the load fails and is not retried
        assert!(textures.get(&ctx, "space", &source).is_none());
        assert_eq!(textures.cache_size(), 0);
        assert!(textures.failed.contains(&TextureKey::new("space", &source)));
    }

    #[test]
    fn url_sources_use_a_texture_the_context_already_has() {
        let ctx = Context::default();
        let url = "bytes://space.png";
        let png = png_source(7).embedded_bytes().unwrap().to_vec();
        egui_extras::install_image_loaders(&ctx);
        ctx.include_bytes(url, png);

        let mut textures = BackgroundTextures::default();
        let source = ImageSource::Url(url.into());
        let id = (0..100).find_map(|_| {
            let id = textures.get(&ctx, "space", &source);
            if id.is_none() {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
            id
        });
        assert!(id.is_some());
        assert_eq!(textures.cache_size(), 0);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let ctx = Context::default();
        let mut textures = BackgroundTextures::new(2);

        textures.get(&ctx, "custom", &png_source(1));
        textures.begin_frame();
        textures.get(&ctx, "custom", &png_source(2));
        textures.begin_frame();
        textures.get(&ctx, "custom", &png_source(3));

        assert_eq!(textures.cache_size(), 2);
        let key = TextureKey::new("custom", &png_source(1));
        assert!(!textures.cache.contains_key(&key));
    }
}
