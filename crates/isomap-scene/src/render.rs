//! Draws a [`Scene`] onto a [`Surface`], back to front.

use std::collections::HashSet;

use isomap_geometry::{IsoProjection, ScreenPosition, TileVertex};
use tracing::{trace, warn};

use crate::assets::ImageCache;
use crate::entity::{Entity, EntityKind, Tile};
use crate::error::SceneError;
use crate::scene::{Layer, Scene};
use crate::surface::{Bitmap, Rect, Rgba, Surface};

const PRISM_TOP: Rgba = Rgba::rgb(0x55, 0x55, 0x55);
const PRISM_LEFT: Rgba = Rgba::rgb(0x44, 0x44, 0x44);
const PRISM_RIGHT: Rgba = Rgba::rgb(0x77, 0x77, 0x77);
const PLACEHOLDER: Rgba = Rgba::rgb(0xcc, 0x33, 0x66);

/// Startup check for a drawing surface.
///
/// # Errors
///
/// `SceneError::MissingSurface` if none was obtained and
/// `SceneError::MissingContext` if it cannot draw. Both are fatal.
pub fn require_surface<S: Surface>(surface: Option<S>) -> Result<S, SceneError> {
    let surface = surface.ok_or(SceneError::MissingSurface)?;
    if !surface.is_ready() {
        return Err(SceneError::MissingContext("surface has no 2d context"));
    }
    Ok(surface)
}

/// Stateless apart from which missing images have already been reported.
#[derive(Debug, Default)]
pub struct Renderer {
    show_coordinates: bool,
    reported_missing: HashSet<String>,
}

impl Renderer {
    /// A renderer with tile labels off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw each tile's `x,y` map position on it.
    pub fn with_coordinates(mut self, show: bool) -> Self {
        self.show_coordinates = show;
        self
    }

    /// Clears `surface` and draws the tile layer, then every entity layer in
    /// depth order.
    ///
    /// Entities whose image is not cached are drawn as a flat marker; the
    /// first miss per image is logged.
    ///
    /// # Errors
    ///
    /// Returns `Err(SceneError::MissingContext)` if the surface cannot draw.
    pub fn render<S: Surface>(
        &mut self,
        scene: &Scene,
        images: &ImageCache<S::Image>,
        surface: &mut S,
    ) -> Result<(), SceneError> {
        if !surface.is_ready() {
            return Err(SceneError::MissingContext("surface has no 2d context"));
        }
        let size = surface.size();
        surface.clear_rect(Rect::new(0.0, 0.0, size.width as f64, size.height as f64));

        let projection = scene.map().projection();
        let tile_color = scene.map().tile_color();
        for tile in scene.tiles().iter().filter(|t| !t.highlight) {
            self.draw_tile(surface, projection, tile, tile_color);
        }
        // Last, so its outline is not painted over by neighbours.
        if let Some(tile) = scene.highlighted() {
            self.draw_tile(surface, projection, tile, tile_color);
        }

        let mut drawn = 0;
        for layer in Layer::ALL {
            for entity in scene.layer(layer) {
                if let Err(e) = draw_entity(surface, projection, images, entity) {
                    self.report(e);
                    fill_outline(surface, &projection.tile_vertex(entity.screen_pos), PLACEHOLDER);
                }
                drawn += 1;
            }
        }
        trace!(tiles = scene.tiles().len(), entities = drawn, "Frame rendered");
        Ok(())
    }

    fn report(&mut self, error: SceneError) {
        let key = match &error {
            SceneError::ImageNotFound(name) => name.clone(),
            other => other.to_string(),
        };
        if self.reported_missing.insert(key) {
            warn!(%error, "Drawing placeholder");
        }
    }

    fn draw_tile<S: Surface>(&self, surface: &mut S, projection: &IsoProjection, tile: &Tile, color: Rgba) {
        let v = projection.tile_vertex(tile.screen_pos);
        surface.save();
        trace_outline(surface, &v);
        surface.fill(color);
        surface.set_line_width(if tile.highlight { 2.0 } else { 1.0 });
        surface.stroke(if tile.highlight { Rgba::HIGHLIGHT } else { Rgba::BLACK });
        if self.show_coordinates {
            let label = tile.map_pos.to_string();
            surface.fill_text(&label, tile.screen_pos.offset(-40.0, 20.0), Rgba::BLACK);
        }
        surface.restore();
    }
}

/// Path around the rhombus: top, left, bottom, right, back to top.
fn trace_outline<S: Surface>(surface: &mut S, v: &TileVertex) {
    surface.begin_path();
    surface.move_to(v.top);
    surface.line_to(v.left);
    surface.line_to(v.bottom);
    surface.line_to(v.right);
    surface.close_path();
}

fn fill_outline<S: Surface>(surface: &mut S, v: &TileVertex, color: Rgba) {
    trace_outline(surface, v);
    surface.fill(color);
}

fn fill_polygon<S: Surface>(surface: &mut S, points: &[ScreenPosition], color: Rgba) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(*first);
    for p in rest {
        surface.line_to(*p);
    }
    surface.close_path();
    surface.fill(color);
}

fn draw_entity<S: Surface>(
    surface: &mut S,
    projection: &IsoProjection,
    images: &ImageCache<S::Image>,
    entity: &Entity,
) -> Result<(), SceneError> {
    match &entity.kind {
        EntityKind::Prism => {
            draw_prism(surface, projection, entity.screen_pos);
            Ok(())
        }
        EntityKind::Image { basename, scaled } => {
            draw_image(surface, projection, images.require(basename)?, entity.screen_pos, *scaled);
            Ok(())
        }
        EntityKind::Person(person) => {
            let sprite = person.sprite();
            draw_image(surface, projection, images.require(&sprite)?, entity.screen_pos, false);
            Ok(())
        }
    }
}

/// A block one tile tall: the floor rhombus lifted by a tile height, plus
/// the two visible side faces.
fn draw_prism<S: Surface>(surface: &mut S, projection: &IsoProjection, anchor: ScreenPosition) {
    let tile = projection.tile_size();
    let (w, h) = (tile.width as f64, tile.height as f64);
    let ScreenPosition { x, y } = anchor;
    let p = ScreenPosition::new;

    surface.save();
    fill_polygon(
        surface,
        &[p(x - w / 2.0, y - h), p(x - w, y - h / 2.0), p(x - w / 2.0, y), p(x, y - h / 2.0)],
        PRISM_TOP,
    );
    fill_polygon(
        surface,
        &[p(x - w, y - h / 2.0), p(x - w, y + h / 2.0), p(x - w / 2.0, y + h), p(x - w / 2.0, y)],
        PRISM_LEFT,
    );
    fill_polygon(
        surface,
        &[p(x - w / 2.0, y), p(x, y - h / 2.0), p(x, y + h / 2.0), p(x - w / 2.0, y + h)],
        PRISM_RIGHT,
    );
    surface.restore();
}

/// Draws `image` standing on the tile: its bottom-left corner sits on the
/// bottom-left of the tile rect. When `scaled`, the image is shrunk (or
/// grown) by `min(tw / iw, th / ih)` to fit the tile.
fn draw_image<S: Surface>(
    surface: &mut S,
    projection: &IsoProjection,
    image: &S::Image,
    anchor: ScreenPosition,
    scaled: bool,
) {
    let bottom_left = projection.tile_rect(anchor).bottom_left;
    let (iw, ih) = (image.width() as f64, image.height() as f64);
    if !scaled {
        surface.draw_image(image, bottom_left.offset(0.0, -ih));
        return;
    }
    if iw <= 0.0 || ih <= 0.0 {
        return;
    }
    let tile = projection.tile_size();
    let ratio = (tile.width as f64 / iw).min(tile.height as f64 / ih);
    let (dw, dh) = (iw * ratio, ih * ratio);
    surface.draw_image_scaled(
        image,
        Rect::new(0.0, 0.0, iw, ih),
        Rect::new(bottom_left.x, bottom_left.y - dh, dw, dh),
    );
}
