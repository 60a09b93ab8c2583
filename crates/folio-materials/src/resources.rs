//! Resource provider: pre-loaded textures addressed by symbolic name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::texture::Texture;

/// Supplies pre-loaded textures by symbolic name (e.g. `"matcapRockTexture"`).
pub trait ResourceProvider {
    /// Returns the texture registered under `name`, if any.
    fn texture(&self, name: &str) -> Option<Arc<Texture>>;
}

/// In-memory [`ResourceProvider`] filled by the asset loader.
#[derive(Debug, Default)]
pub struct Resources {
    textures: HashMap<String, Arc<Texture>>,
}

impl Resources {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(name.into(), texture.clone());
        texture
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl ResourceProvider for Resources {
    fn texture(&self, name: &str) -> Option<Arc<Texture>> {
        self.textures.get(name).cloned()
    }
}

/// Looks up `name`, logging a warning when the provider does not have it.
pub fn require_texture(provider: &dyn ResourceProvider, name: &str) -> Option<Arc<Texture>> {
    let texture = provider.texture(name);
    if texture.is_none() {
        warn!("Texture resource {name:?} is not loaded; slot left unbound");
    }
    texture
}
