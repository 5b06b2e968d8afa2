//! The drawing surface the renderer paints onto.
//!
//! A [`Surface`] is the boundary to whatever backend actually puts pixels on
//! screen. It mirrors a 2D canvas context: path building, stroke/fill, image
//! blits, text, and a save/restore state stack.

use core::fmt;

use isomap_geometry::{ScreenPosition, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Highlight stroke used for the hovered tile.
    pub const HIGHLIGHT: Rgba = Rgba::rgb(0xff, 0xff, 0x00);
    /// Default tile fill.
    pub const TILE: Rgba = Rgba::rgb(0x15, 0xb8, 0x9a);

    /// Construct an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Rgba { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => None,
        }
    }

    /// Builds an opaque colour from hue (degrees), saturation and lightness
    /// (both `0.0..=1.0`).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba::rgb(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Construct a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }
}

/// Anything with pixel dimensions that a [`Surface`] can blit.
pub trait Bitmap {
    /// Natural width in pixels.
    fn width(&self) -> u32;
    /// Natural height in pixels.
    fn height(&self) -> u32;
}

/// A 2D drawing surface.
pub trait Surface {
    /// Image type this surface can draw.
    type Image: Bitmap;

    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Returns `false` if the surface has no usable drawing context.
    fn is_ready(&self) -> bool {
        true
    }

    /// Clears a rectangle to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Starts a new path, discarding the current one.
    fn begin_path(&mut self);
    /// Starts a new sub-path at `p`.
    fn move_to(&mut self, p: ScreenPosition);
    /// Adds a straight line to `p`.
    fn line_to(&mut self, p: ScreenPosition);
    /// Closes the current sub-path.
    fn close_path(&mut self);
    /// Strokes the current path.
    fn stroke(&mut self, color: Rgba);
    /// Fills the current path.
    fn fill(&mut self, color: Rgba);
    /// Sets the stroke width for subsequent strokes.
    fn set_line_width(&mut self, width: f64);

    /// Draws `image` at its natural size with its top-left corner at `dest`.
    fn draw_image(&mut self, image: &Self::Image, dest: ScreenPosition);
    /// Draws the `src` region of `image` stretched into `dest`.
    fn draw_image_scaled(&mut self, image: &Self::Image, src: Rect, dest: Rect);

    /// Draws `text` with its baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: ScreenPosition, color: Rgba);

    /// Pushes the current drawing state.
    fn save(&mut self);
    /// Pops the last saved drawing state.
    fn restore(&mut self);
}
