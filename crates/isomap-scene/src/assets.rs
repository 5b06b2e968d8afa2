//! Image cache keyed by asset basename.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::SceneError;

/// Returns the basename of an image path: the final `/` segment with its
/// extension stripped.
///
/// The segment must look like `<name>.<ext>` with both parts non-empty; the
/// last dot separates them. Anything else yields `None`.
///
/// ```
/// use isomap_scene::assets::basename;
/// assert_eq!(basename("assets/man-ne.png"), Some("man-ne"));
/// assert_eq!(basename("assets/tiles/"), None);
/// ```
pub fn basename(path: &str) -> Option<&str> {
    let last = path.rsplit('/').next()?;
    let (name, ext) = last.rsplit_once('.')?;
    (!name.is_empty() && !ext.is_empty()).then_some(name)
}

/// Pairs each path with its basename, logging and skipping paths that have none.
pub fn manifest<'a>(paths: &[&'a str]) -> Vec<(&'a str, &'a str)> {
    paths
        .iter()
        .filter_map(|&path| match basename(path) {
            Some(name) => Some((name, path)),
            None => {
                warn!(path, "Image path is not valid, skipping");
                None
            }
        })
        .collect()
}

/// Loaded images by basename.
#[derive(Debug)]
pub struct ImageCache<I> {
    images: HashMap<String, I>,
}

impl<I> Default for ImageCache<I> {
    fn default() -> Self {
        ImageCache { images: HashMap::new() }
    }
}

impl<I> ImageCache<I> {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `image` under `name`, returning any image it replaces.
    pub fn insert(&mut self, name: &str, image: I) -> Option<I> {
        self.images.insert(name.to_string(), image)
    }

    /// Looks up an image by basename.
    pub fn get(&self, name: &str) -> Option<&I> {
        self.images.get(name)
    }

    /// Looks up an image, failing with [`SceneError::ImageNotFound`].
    pub fn require(&self, name: &str) -> Result<&I, SceneError> {
        self.get(name).ok_or_else(|| SceneError::ImageNotFound(name.to_string()))
    }

    /// Returns `true` if an image is cached under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Loads every path through `loader` and caches it under its basename.
    ///
    /// Invalid paths and failed loads are logged and skipped. Returns the
    /// number of images cached.
    pub fn load_all<E, F>(&mut self, paths: &[&str], mut loader: F) -> usize
    where
        E: core::fmt::Display,
        F: FnMut(&str) -> Result<I, E>,
    {
        let mut loaded = 0;
        for (name, path) in manifest(paths) {
            match loader(path) {
                Ok(image) => {
                    info!(name, path, "Image loaded");
                    self.insert(name, image);
                    loaded += 1;
                }
                Err(e) => warn!(name, path, error = %e, "Failed to load image"),
            }
        }
        loaded
    }
}
