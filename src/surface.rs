use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(Rgb { r, g, b }: Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

/// A 2d pixel canvas.
///
/// Coordinates are in pixels, with `(0, 0)` at the top left. A pixel `(x, y)` spans the square
/// `[x, x + 1) x [y, y + 1)`, so its center sits at `(x + 0.5, y + 0.5)`. Shapes cover the pixels
/// whose centers they contain, and anything past the edge of the surface is clipped.
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Turn off every pixel in the rectangle
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Paint the rectangle with the fill style
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Drop the current path
    fn begin_path(&mut self);

    /// Start a new subpath at `(x, y)`
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current subpath with a segment to `(x, y)`
    fn line_to(&mut self, x: f64, y: f64);

    /// Paint every segment of the current path with the stroke style and line width
    fn stroke(&mut self);

    fn set_fill_style(&mut self, color: Rgb);

    fn set_stroke_style(&mut self, color: Rgb);

    fn set_line_width(&mut self, width: f64);

    /// Clear the whole surface
    fn clear(&mut self) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.clear_rect(0.0, 0.0, w, h);
    }
}
