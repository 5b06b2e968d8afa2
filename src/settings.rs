use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use isomap_geometry::{MapPosition, Size};
use isomap_scene::{Rgba, TieBreak};
use serde::Deserialize;
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");
const LOCAL_CONFIG_NAME: &str = "isomap";
const ENV_PREFIX: &str = "ISOMAP";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub window: WindowSettings,
    pub map: MapSettings,
    pub render: RenderSettings,
    pub game: GameSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub high_dpi: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings { title: "Isomap".to_string(), width: 1024, height: 800, high_dpi: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    pub size: Size,
    pub tile_size: Size,
    pub tile_color: String,
    pub random_hue: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    pub show_coordinates: bool,
    pub tie_break: TieBreak,
    pub scale_images: bool,
    pub background: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A person walks the map; clicks drop prisms.
    Walk,
    /// A single image is dropped and then dragged around.
    Editor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameSettings {
    pub mode: Mode,
    pub step_interval_ms: u64,
    pub person_start: MapPosition,
    pub sprite_prefix: String,
    pub editor_image: String,
    pub assets: Vec<String>,
}

impl Settings {
    /// Embedded defaults, then `./isomap.toml` if present, then `ISOMAP__*`
    /// environment variables.
    pub fn load() -> Result<Settings> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name(LOCAL_CONFIG_NAME).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
            .build()
            .context("Failed to assemble configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize settings")?;
        debug!(?settings, "Settings loaded");
        info!(mode = ?settings.game.mode, map = %settings.map.size, "Configuration loaded");
        Ok(settings)
    }

    pub fn tile_color(&self) -> Result<Rgba> {
        parse_color("map.tile_color", &self.map.tile_color)
    }

    pub fn background(&self) -> Result<Rgba> {
        parse_color("render.background", &self.render.background)
    }
}

fn parse_color(key: &str, value: &str) -> Result<Rgba> {
    Rgba::from_hex(value).with_context(|| format!("{} is not a hex colour: {:?}", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Settings {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_embedded_defaults() {
        let settings = defaults();
        assert_eq!(settings.map.size, Size::new(14, 14));
        assert_eq!(settings.map.tile_size, Size::new(64, 32));
        assert_eq!(settings.tile_color().unwrap(), Rgba::TILE);
        assert_eq!(settings.background().unwrap(), Rgba::WHITE);
        assert_eq!(settings.render.tie_break, TieBreak::Descending);
        assert_eq!(settings.game.mode, Mode::Walk);
        assert_eq!(settings.game.person_start, MapPosition::new(1, 1));
        assert_eq!(settings.window.width, WindowSettings::default().width);
    }

    #[test]
    fn test_bad_colour_is_reported() {
        let mut settings = defaults();
        settings.map.tile_color = "teal".to_string();
        let err = settings.tile_color().unwrap_err();
        assert!(err.to_string().contains("map.tile_color"));
    }
}
