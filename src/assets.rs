use std::collections::HashMap;

use isomap_scene::ImageCache;
use isomap_scene::assets::basename;
use macroquad::texture::{FilterMode, load_texture};
use tracing::info;

use crate::graphics::Sprite;

/// Loads every image in `paths` into a cache keyed by basename.
///
/// Unparsable paths and failed loads are logged and skipped.
pub async fn load_sprites(paths: &[String]) -> ImageCache<Sprite> {
    let paths: Vec<&str> = paths.iter().map(String::as_str).collect();

    let mut textures = HashMap::new();
    for &path in paths.iter().filter(|p| basename(p).is_some()) {
        textures.insert(path, load_texture(path.trim()).await);
    }

    let mut cache = ImageCache::new();
    let loaded = cache.load_all(&paths, |path| match textures.remove(path) {
        Some(Ok(texture)) => {
            texture.set_filter(FilterMode::Nearest);
            Ok(Sprite(texture))
        }
        Some(Err(e)) => Err(e.to_string()),
        None => Err("texture was not requested".to_string()),
    });
    info!(loaded, requested = paths.len(), "Image cache ready");
    cache
}
