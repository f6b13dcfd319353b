use crate::engine::assets::resource_cache::ResourceCache;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;
use constants::texture::TEXTURE_LIBRARY;
use std::collections::{HashMap, HashSet};

/// A selectable surface texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub id: &'static str,
    pub source_path: &'static str,
}

impl TextureDescriptor {
    pub fn lookup(id: &str) -> Option<Self> {
        TEXTURE_LIBRARY
            .iter()
            .find(|info| info.id == id)
            .map(|info| Self {
                id: info.id,
                source_path: info.path,
            })
    }

    pub fn all() -> impl Iterator<Item = Self> {
        TEXTURE_LIBRARY.iter().map(|info| Self {
            id: info.id,
            source_path: info.path,
        })
    }
}

/// Load state of a texture as seen by material passes.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureStatus {
    Pending,
    Ready(Handle<Image>),
    /// Decode failed or the id is not in the library. Never retried.
    Missing,
}

/// Process-lifetime cache of decoded surface textures, keyed by texture id.
#[derive(Resource, Default)]
pub struct TextureRegistry {
    cache: ResourceCache<Handle<Image>>,
    ready: HashSet<&'static str>,
    missing: HashSet<&'static str>,
    sampled_accents: HashMap<&'static str, Color>,
}

impl TextureRegistry {
    /// Request a decode of `id` through the asset server. Repeated calls share
    /// one load.
    pub fn ensure_requested(
        &mut self,
        id: &str,
        asset_server: &AssetServer,
    ) -> Option<Handle<Image>> {
        self.request_with(id, |path| load_texture(asset_server, path))
    }

    /// Request `id` with an explicit loader. Unknown ids start no load.
    pub fn request_with(
        &mut self,
        id: &str,
        load: impl FnOnce(&str) -> Handle<Image>,
    ) -> Option<Handle<Image>> {
        let descriptor = TextureDescriptor::lookup(id)?;
        Some(self.cache.get_or_load(descriptor.source_path, load))
    }

    pub fn status(&self, id: &str) -> TextureStatus {
        let Some(descriptor) = TextureDescriptor::lookup(id) else {
            return TextureStatus::Missing;
        };
        if self.missing.contains(descriptor.id) {
            return TextureStatus::Missing;
        }
        match self.cache.get(descriptor.source_path) {
            Some(handle) if self.ready.contains(descriptor.id) => {
                TextureStatus::Ready(handle.clone())
            }
            _ => TextureStatus::Pending,
        }
    }

    /// Requested textures that have not resolved yet.
    pub fn unresolved(&self) -> Vec<(&'static str, Handle<Image>)> {
        TextureDescriptor::all()
            .filter(|d| !self.ready.contains(d.id) && !self.missing.contains(d.id))
            .filter_map(|d| self.cache.get(d.source_path).map(|h| (d.id, h.clone())))
            .collect()
    }

    pub fn mark_ready(&mut self, id: &str) {
        if let Some(descriptor) = TextureDescriptor::lookup(id) {
            self.ready.insert(descriptor.id);
        }
    }

    pub fn mark_missing(&mut self, id: &str) {
        if let Some(descriptor) = TextureDescriptor::lookup(id) {
            self.missing.insert(descriptor.id);
        }
    }

    pub fn record_accent(&mut self, id: &str, colour: Color) {
        if let Some(descriptor) = TextureDescriptor::lookup(id) {
            self.sampled_accents.insert(descriptor.id, colour);
        }
    }

    pub fn sampled_accent(&self, id: &str) -> Option<Color> {
        self.sampled_accents.get(id).copied()
    }

    /// Number of (resolved, requested) textures, for progress reporting.
    pub fn progress(&self) -> (usize, usize) {
        (self.ready.len() + self.missing.len(), self.cache.len())
    }

    pub fn loads_started(&self) -> usize {
        self.cache.loads_started()
    }
}

/// Load a texture as sRGB colour data. Row order is kept as stored, matching
/// the glTF UV origin.
pub fn load_texture(asset_server: &AssetServer, path: &str) -> Handle<Image> {
    asset_server.load_with_settings(path.to_string(), |settings: &mut ImageLoaderSettings| {
        settings.is_srgb = true;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_handle(images: &mut Assets<Image>) -> Handle<Image> {
        images.add(Image::default())
    }

    #[test]
    fn texture_resolves_once_and_reports_ready() {
        let mut images = Assets::<Image>::default();
        let handle = image_handle(&mut images);
        let mut registry = TextureRegistry::default();

        let first = registry.request_with("texture_2", |_| handle.clone());
        let second = registry.request_with("texture_2", |_| panic!("second decode"));
        assert_eq!(first, second);
        assert_eq!(registry.loads_started(), 1);
        assert_eq!(registry.status("texture_2"), TextureStatus::Pending);

        registry.mark_ready("texture_2");
        assert_eq!(registry.status("texture_2"), TextureStatus::Ready(handle));
        assert!(registry.unresolved().is_empty());
    }

    #[test]
    fn unknown_id_is_missing_without_a_load() {
        let mut registry = TextureRegistry::default();
        assert!(registry
            .request_with("texture_9", |_| panic!("no load for unknown ids"))
            .is_none());
        assert_eq!(registry.status("texture_9"), TextureStatus::Missing);
        assert_eq!(registry.loads_started(), 0);
    }

    #[test]
    fn failed_decode_stays_missing() {
        let mut images = Assets::<Image>::default();
        let handle = image_handle(&mut images);
        let mut registry = TextureRegistry::default();

        registry.request_with("texture_3", |_| handle.clone());
        assert_eq!(registry.unresolved().len(), 1);

        registry.mark_missing("texture_3");
        assert_eq!(registry.status("texture_3"), TextureStatus::Missing);
        assert_eq!(registry.progress(), (1, 1));
    }

    #[test]
    fn library_has_five_distinct_sources() {
        let paths: HashSet<_> = TextureDescriptor::all().map(|d| d.source_path).collect();
        assert_eq!(paths.len(), 5);
        assert_eq!(
            TextureDescriptor::lookup("texture_4").map(|d| d.source_path),
            Some("Texture/4.jpg")
        );
    }
}
