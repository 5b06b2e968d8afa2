mod assets;   // texture loading into the image cache
mod game;     // demo modes, input handling and the step timer
mod graphics; // window config and the macroquad drawing surface
mod settings; // layered configuration

use anyhow::Context;
use game::App;
use graphics::{MacroquadSurface, window_conf};
use isomap_scene::Surface;
use isomap_scene::render::require_surface;
use macroquad::time::get_time;
use macroquad::window::next_frame;
use settings::Settings;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Isomap started. Loading configuration and assets...");

    match run().await {
        Ok(_) => info!("Isomap finished."),
        Err(e) => error!("Isomap failed: {:?}", e),
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let background = settings.background()?;
    let mut surface = require_surface(MacroquadSurface::open(background)).context("Drawing surface unavailable")?;

    let images = assets::load_sprites(&settings.game.assets).await;
    let mut app = App::new(&settings, surface.size(), images)?;

    info!("Entering frame loop");
    loop {
        app.handle_input(&surface);
        app.tick(get_time());
        app.draw(&mut surface).context("Frame rendering failed")?;
        next_frame().await
    }
}
