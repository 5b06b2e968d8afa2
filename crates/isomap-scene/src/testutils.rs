//! In-memory surface that records draw calls for assertions.

use isomap_geometry::{ScreenPosition, Size};

use crate::surface::{Bitmap, Rect, Rgba, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestImage {
    pub width: u32,
    pub height: u32,
}

impl Bitmap for TestImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear(Rect),
    Stroke(Rgba),
    Fill(Rgba),
    LineWidth(f64),
    Image(ScreenPosition),
    ImageScaled(Rect, Rect),
    Text(String, ScreenPosition),
}

#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    ready: bool,
    pub ops: Vec<Op>,
    pub paths: Vec<Vec<ScreenPosition>>,
    pub depth: i32,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        RecordingSurface { size, ready: true, ops: Vec::new(), paths: Vec::new(), depth: 0 }
    }

    /// A surface whose context could not be obtained.
    pub fn detached() -> Self {
        RecordingSurface { ready: false, ..Self::new(Size::new(0, 0)) }
    }

    pub fn fills(&self) -> Vec<Rgba> {
        self.ops.iter().filter_map(|op| if let Op::Fill(c) = op { Some(*c) } else { None }).collect()
    }

    pub fn strokes(&self) -> Vec<Rgba> {
        self.ops.iter().filter_map(|op| if let Op::Stroke(c) = op { Some(*c) } else { None }).collect()
    }

    pub fn images(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Image(_) | Op::ImageScaled(..))).collect()
    }

    fn current_path(&mut self) -> &mut Vec<ScreenPosition> {
        if self.paths.is_empty() {
            self.paths.push(Vec::new());
        }
        let last = self.paths.len() - 1;
        &mut self.paths[last]
    }
}

impl Surface for RecordingSurface {
    type Image = TestImage;

    fn size(&self) -> Size {
        self.size
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(Op::Clear(rect));
    }

    fn begin_path(&mut self) {
        self.paths.push(Vec::new());
    }

    fn move_to(&mut self, p: ScreenPosition) {
        self.current_path().push(p);
    }

    fn line_to(&mut self, p: ScreenPosition) {
        self.current_path().push(p);
    }

    fn close_path(&mut self) {}

    fn stroke(&mut self, color: Rgba) {
        self.ops.push(Op::Stroke(color));
    }

    fn fill(&mut self, color: Rgba) {
        self.ops.push(Op::Fill(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }

    fn draw_image(&mut self, _image: &TestImage, dest: ScreenPosition) {
        self.ops.push(Op::Image(dest));
    }

    fn draw_image_scaled(&mut self, _image: &TestImage, src: Rect, dest: Rect) {
        self.ops.push(Op::ImageScaled(src, dest));
    }

    fn fill_text(&mut self, text: &str, at: ScreenPosition, _color: Rgba) {
        self.ops.push(Op::Text(text.to_string(), at));
    }

    fn save(&mut self) {
        self.depth += 1;
    }

    fn restore(&mut self) {
        self.depth -= 1;
    }
}
