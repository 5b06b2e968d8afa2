use anyhow::{Context, Result};
use isomap_geometry::{ScreenPosition, Size};
use isomap_scene::input::pointer_position;
use isomap_scene::{
    ArrowKey, DirectionalInput, EntityId, ImageCache, Layer, Person, Renderer, Rgba, Scene, SceneError, Surface,
    TileMap,
};
use macroquad::input::{KeyCode, MouseButton, is_key_pressed, is_key_released, is_mouse_button_pressed, mouse_position};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::graphics::{MacroquadSurface, Sprite};
use crate::settings::{Mode, Settings};

const STATUS_POS: ScreenPosition = ScreenPosition::new(10.0, 20.0);

fn key_code(key: ArrowKey) -> KeyCode {
    match key {
        ArrowKey::Left => KeyCode::Left,
        ArrowKey::Up => KeyCode::Up,
        ArrowKey::Right => KeyCode::Right,
        ArrowKey::Down => KeyCode::Down,
    }
}

/// Demo state: the scene plus whatever the current mode tracks between frames.
pub struct App {
    mode: Mode,
    scene: Scene,
    renderer: Renderer,
    images: ImageCache<Sprite>,
    input: DirectionalInput,
    walker: Option<EntityId>,
    dragged: Option<EntityId>,
    editor_image: String,
    scale_images: bool,
    step_interval: f64,
    last_step: f64,
    pointer: Option<ScreenPosition>,
    status: String,
}

impl App {
    pub fn new(settings: &Settings, screen: Size, images: ImageCache<Sprite>) -> Result<App> {
        let mut color = settings.tile_color()?;
        if settings.map.random_hue {
            let hue = rand::rng().random_range(0.0..360.0);
            color = Rgba::from_hsl(hue, 0.6, 0.45);
            info!(hue, %color, "Random tile colour");
        }

        let map = TileMap::builder()
            .with_screen_size(screen)
            .with_map_size(settings.map.size)
            .with_tile_size(settings.map.tile_size)
            .with_color(color)
            .build()
            .context("Failed to build tile map")?;

        let mut scene = Scene::new(map).with_tie_break(settings.render.tie_break);
        scene.add_tiles();

        let walker = match settings.game.mode {
            Mode::Walk => {
                let person = Person::new(settings.game.person_start).with_sprite_prefix(&settings.game.sprite_prefix);
                let id = scene.spawn_person(person);
                if id.is_none() {
                    warn!(start = %settings.game.person_start, "Person start is off the map, nobody to walk");
                }
                id
            }
            Mode::Editor => None,
        };

        info!(mode = ?settings.game.mode, images = images.len(), "Scene ready");
        Ok(App {
            mode: settings.game.mode,
            scene,
            renderer: Renderer::new().with_coordinates(settings.render.show_coordinates),
            images,
            input: DirectionalInput::default(),
            walker,
            dragged: None,
            editor_image: settings.game.editor_image.clone(),
            scale_images: settings.render.scale_images,
            step_interval: settings.game.step_interval_ms as f64 / 1000.0,
            last_step: 0.0,
            pointer: None,
            status: String::new(),
        })
    }

    /// Polls keyboard and mouse for this frame.
    pub fn handle_input(&mut self, surface: &MacroquadSurface) {
        for key in ArrowKey::ALL {
            let code = key_code(key);
            let mut changed = false;
            if is_key_pressed(code) {
                changed |= self.input.key_down(key).is_some();
            }
            if is_key_released(code) {
                changed |= self.input.key_up(key);
            }
            if let (true, Some(walker)) = (changed, self.walker) {
                self.scene.steer(walker, self.input.current());
            }
        }

        let (mx, my) = mouse_position();
        let pointer = pointer_position(ScreenPosition::new(mx as f64, my as f64), surface.bounds());
        if self.pointer != Some(pointer) {
            self.pointer = Some(pointer);
            self.pointer_moved(pointer);
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            self.pointer_pressed(pointer);
        }
    }

    fn pointer_moved(&mut self, pointer: ScreenPosition) {
        let cell = self.scene.map().screen_to_map(pointer);
        self.status = format!("[{:.0},{:.0}] - [{},{}]", pointer.x, pointer.y, cell.x, cell.y);
        match self.mode {
            Mode::Walk => {
                self.scene.highlight(self.scene.map().pick(pointer));
            }
            Mode::Editor => {
                if let Some(id) = self.dragged {
                    self.scene.move_entity(id, pointer);
                }
            }
        }
    }

    fn pointer_pressed(&mut self, pointer: ScreenPosition) {
        let Some(cell) = self.scene.map().pick(pointer) else {
            debug!(%pointer, "Click outside the map");
            return;
        };
        match self.mode {
            Mode::Walk => {
                if let Some(id) = self.scene.place_prism(cell) {
                    debug!(%id, %cell, "Prism placed");
                }
            }
            Mode::Editor if self.dragged.is_none() => {
                self.dragged = self.scene.place_image(&self.editor_image, cell, self.scale_images, Layer::Props);
            }
            Mode::Editor => {}
        }
    }

    /// Steps the scene once every `step_interval` seconds.
    pub fn tick(&mut self, now: f64) {
        if now - self.last_step >= self.step_interval {
            self.scene.update();
            self.last_step = now;
        }
    }

    pub fn draw(&mut self, surface: &mut MacroquadSurface) -> Result<(), SceneError> {
        self.renderer.render(&self.scene, &self.images, surface)?;
        surface.fill_text(&self.status, STATUS_POS, Rgba::BLACK);
        Ok(())
    }
}
