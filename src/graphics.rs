use isomap_geometry::{ScreenPosition, Size};
use isomap_scene::{Bitmap, Rect, Rgba, Surface};
use macroquad::color::Color;
use macroquad::math::{Rect as MqRect, Vec2, vec2};
use macroquad::shapes::{draw_line, draw_rectangle, draw_triangle};
use macroquad::text::draw_text;
use macroquad::texture::{DrawTextureParams, Texture2D, draw_texture, draw_texture_ex};
use macroquad::window::{Conf, clear_background, screen_height, screen_width};

use crate::settings::{Settings, WindowSettings};

const FONT_SIZE: f32 = 16.0;

// Function to configure the macroquad window. Runs before logging is set up,
// so a broken config silently falls back to the built-in window settings.
pub fn window_conf() -> Conf {
    let window = Settings::load().map(|s| s.window).unwrap_or_else(|_| WindowSettings::default());
    Conf {
        window_title: window.title,
        window_width: window.width as i32,
        window_height: window.height as i32,
        high_dpi: window.high_dpi,
        ..Default::default()
    }
}

/// A loaded texture, drawable by [`MacroquadSurface`].
#[derive(Debug, Clone)]
pub struct Sprite(pub Texture2D);

impl Bitmap for Sprite {
    fn width(&self) -> u32 {
        self.0.width() as u32
    }

    fn height(&self) -> u32 {
        self.0.height() as u32
    }
}

fn color(c: Rgba) -> Color {
    Color::from_rgba(c.r, c.g, c.b, c.a)
}

fn point(p: ScreenPosition) -> Vec2 {
    vec2(p.x as f32, p.y as f32)
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    line_width: f32,
}

/// Immediate-mode canvas over the macroquad window.
///
/// Paths are buffered until `stroke` or `fill`. Fills assume a convex
/// polygon and are drawn as a triangle fan.
pub struct MacroquadSurface {
    background: Color,
    path: Vec<Vec2>,
    closed: bool,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl MacroquadSurface {
    /// `None` if the window has no drawable area.
    pub fn open(background: Rgba) -> Option<Self> {
        if screen_width() < 1.0 || screen_height() < 1.0 {
            return None;
        }
        Some(MacroquadSurface::new(background))
    }

    pub fn new(background: Rgba) -> Self {
        MacroquadSurface {
            background: color(background),
            path: Vec::new(),
            closed: false,
            state: DrawState { line_width: 1.0 },
            saved: Vec::new(),
        }
    }

    /// Window area in window coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, screen_width() as f64, screen_height() as f64)
    }
}

impl Surface for MacroquadSurface {
    type Image = Sprite;

    fn size(&self) -> Size {
        Size::new(screen_width() as u32, screen_height() as u32)
    }

    fn clear_rect(&mut self, rect: Rect) {
        let size = self.size();
        if rect.x <= 0.0 && rect.y <= 0.0 && rect.width >= size.width as f64 && rect.height >= size.height as f64 {
            clear_background(self.background);
        } else {
            draw_rectangle(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32, self.background);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn move_to(&mut self, p: ScreenPosition) {
        self.path.push(point(p));
    }

    fn line_to(&mut self, p: ScreenPosition) {
        self.path.push(point(p));
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn stroke(&mut self, c: Rgba) {
        let c = color(c);
        for pair in self.path.windows(2) {
            draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, self.state.line_width, c);
        }
        if let (true, Some(first), Some(last)) = (self.closed, self.path.first(), self.path.last()) {
            draw_line(last.x, last.y, first.x, first.y, self.state.line_width, c);
        }
    }

    fn fill(&mut self, c: Rgba) {
        let c = color(c);
        let Some((&first, rest)) = self.path.split_first() else {
            return;
        };
        for pair in rest.windows(2) {
            draw_triangle(first, pair[0], pair[1], c);
        }
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width as f32;
    }

    fn draw_image(&mut self, image: &Sprite, dest: ScreenPosition) {
        draw_texture(&image.0, dest.x as f32, dest.y as f32, macroquad::color::WHITE);
    }

    fn draw_image_scaled(&mut self, image: &Sprite, src: Rect, dest: Rect) {
        let params = DrawTextureParams {
            dest_size: Some(vec2(dest.width as f32, dest.height as f32)),
            source: Some(MqRect::new(src.x as f32, src.y as f32, src.width as f32, src.height as f32)),
            ..Default::default()
        };
        draw_texture_ex(&image.0, dest.x as f32, dest.y as f32, macroquad::color::WHITE, params);
    }

    fn fill_text(&mut self, text: &str, at: ScreenPosition, c: Rgba) {
        draw_text(text, at.x as f32, at.y as f32, FONT_SIZE, color(c));
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}
