use std::ops::Range;

use crate::surface::Rgb;
use crate::surface::Surface;

/// Hex values of braille dots
///
/// ```notrust
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A terminal backed [`Surface`]. Every pixel is one braille dot, so a single character on screen
/// holds a 2x4 block of pixels.
pub struct Camera {
    /// The pixel buffer. `None` is an unlit dot, otherwise the color it was painted with.
    pb: Vec<Option<Rgb>>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Color of each braille character, in the same order as `cp`
    colors: Vec<Option<Rgb>>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    fill: Rgb,
    stroke: Rgb,
    line_width: f64,

    /// Subpaths of the current path
    path: Vec<Vec<(f64, f64)>>,
}

impl Camera {
    /// A camera covering `cols` by `rows` terminal characters
    pub fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = (cols as usize * 2, rows as usize * 4);
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        // Each braille character is 3 bytes, and newlines one byte. Since we need `bh` newlines,
        // this gives us a framebuffer of length `3 * (bw * bh) + bh`.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        let mut cam = Self {
            pb: vec![None; w * h],
            fb,
            cp: vec![BRAILLE_EMPTY; bw * bh],
            colors: vec![None; bw * bh],
            w,
            h,
            fill: Rgb::new(255, 255, 255),
            stroke: Rgb::new(255, 255, 255),
            line_width: 1.0,
            path: Vec::new(),
        };
        cam.render();

        cam
    }

    /// Number of braille characters in each line of the frame
    pub fn glyph_width(&self) -> usize {
        self.w.div_ceil(2)
    }

    /// The color of a pixel, if it's lit
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.w && y < self.h {
            self.pb[self.xy_from(x, y)]
        } else {
            None
        }
    }

    /// The last rendered frame
    pub fn frame(&self) -> &str {
        &self.fb
    }

    /// The color of every braille character of the last rendered frame, line by line. A character
    /// takes the color of its topmost, then leftmost, lit dot.
    pub fn glyph_colors(&self) -> &[Option<Rgb>] {
        &self.colors
    }

    /// Fundamentally, we have a framebuffer of every pixel on our screen, and we ask ourselves "Is
    /// this pixel on or off?".
    pub fn render(&mut self) -> &str {
        let bw = self.glyph_width();

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);
        self.colors.fill(None);

        for (n, px) in self.pb.iter().enumerate() {
            let Some(color) = px else { continue };

            let (x, y) = self.xy_to(n);
            let i = (y / 4) * bw + (x / 2);

            self.cp[i] += Self::get_hex_value(x, y);
            self.colors[i].get_or_insert(*color);
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn paint(&mut self, xs: Range<usize>, ys: Range<usize>, color: Option<Rgb>) {
        for y in ys {
            for x in xs.clone() {
                let i = self.xy_from(x, y);
                self.pb[i] = color;
            }
        }
    }

    /// Paint a square of side `line_width` centered on `(x, y)`
    fn dab(&mut self, x: f64, y: f64, color: Rgb) {
        let lw = self.line_width;
        let xs = span(x - lw / 2.0, lw, self.w);
        let ys = span(y - lw / 2.0, lw, self.h);

        self.paint(xs, ys, Some(color));
    }

    /// Step along the major axis of the segment one pixel at a time, dabbing the pen at every step
    fn stroke_segment(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil();

        if !steps.is_finite() {
            return;
        }

        let steps = steps as usize;
        let color = self.stroke;

        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
            self.dab(x0 + dx * t, y0 + dy * t, color);
        }
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl Surface for Camera {
    fn width(&self) -> u32 {
        self.w as u32
    }

    fn height(&self) -> u32 {
        self.h as u32
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (xs, ys) = rect_spans(x, y, w, h, self.w, self.h);
        self.paint(xs, ys, None);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (xs, ys) = rect_spans(x, y, w, h, self.w, self.h);
        self.paint(xs, ys, Some(self.fill));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);

        for subpath in &path {
            for segment in subpath.windows(2) {
                self.stroke_segment(segment[0], segment[1]);
            }
        }

        self.path = path;
    }

    fn set_fill_style(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_stroke_style(&mut self, color: Rgb) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }
}

/// Indices of the pixels whose centers lie in `[start, start + len)`, clipped to `[0, limit)`
fn span(start: f64, len: f64, limit: usize) -> Range<usize> {
    if !start.is_finite() || !len.is_finite() {
        return 0..0;
    }

    let lo = (start - 0.5).ceil().max(0.0);
    let hi = (start + len - 0.5).ceil().min(limit as f64);

    if lo >= hi {
        return 0..0;
    }

    lo as usize..hi as usize
}

fn rect_spans(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    limit_x: usize,
    limit_y: usize,
) -> (Range<usize>, Range<usize>) {
    // negative sizes extend left and up
    let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
    let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };

    (span(x, w, limit_x), span(y, h, limit_y))
}

#[cfg(test)]
mod test {
    use super::Camera;
    use super::span;
    use crate::surface::Rgb;
    use crate::surface::Surface;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn span_rounds_to_pixel_centers() {
        assert_eq!(span(4.0, 4.0, 100), 4..8);
        assert_eq!(span(3.0, 1.0, 100), 3..4);
        assert_eq!(span(-1.0, 1.0, 100), 0..0);
        assert_eq!(span(98.0, 10.0, 100), 98..100);
        assert_eq!(span(f64::NAN, 1.0, 100), 0..0);
    }

    #[test]
    fn dot_values() {
        let table = [[0x1, 0x8], [0x2, 0x10], [0x4, 0x20], [0x40, 0x80]];

        for (y, row) in table.iter().enumerate() {
            for (x, &hex) in row.iter().enumerate() {
                assert_eq!(Camera::get_hex_value(x, y), hex, "dot ({x}, {y})");
                assert_eq!(Camera::get_hex_value(x + 2, y + 4), hex, "dot ({x}, {y}) one glyph over");
            }
        }
    }

    #[test]
    fn blank_frame() {
        let mut cam = Camera::new(2, 1);

        assert_eq!(cam.render(), "\u{2800}\u{2800}\n");
        assert_eq!(cam.glyph_colors(), &[None, None]);
    }

    #[test]
    fn fill_full_glyph() {
        let mut cam = Camera::new(2, 2);
        cam.set_fill_style(RED);
        cam.fill_rect(0.0, 0.0, 2.0, 4.0);

        assert_eq!(cam.render(), "\u{28FF}\u{2800}\n\u{2800}\u{2800}\n");
        assert_eq!(cam.glyph_colors(), &[Some(RED), None, None, None]);
    }

    #[test]
    fn fill_then_clear() {
        let mut cam = Camera::new(2, 1);
        cam.fill_rect(0.0, 0.0, 4.0, 4.0);
        cam.clear_rect(1.0, 0.0, 2.0, 4.0);

        assert_eq!(cam.pixel(0, 0), Some(Rgb::new(255, 255, 255)));
        assert_eq!(cam.pixel(1, 0), None);
        assert_eq!(cam.pixel(2, 3), None);
        assert_eq!(cam.pixel(3, 3), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn half_pixel_vertical_line() {
        let mut cam = Camera::new(4, 1);
        cam.set_stroke_style(BLUE);
        cam.begin_path();
        cam.move_to(3.5, 0.0);
        cam.line_to(3.5, 4.0);
        cam.stroke();

        for y in 0..4 {
            for x in 0..8 {
                let want = if x == 3 { Some(BLUE) } else { None };
                assert_eq!(cam.pixel(x, y), want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn half_pixel_horizontal_line() {
        let mut cam = Camera::new(2, 2);
        cam.begin_path();
        cam.move_to(0.0, 3.5);
        cam.line_to(4.0, 3.5);
        cam.stroke();

        // the bottom row of dots of the top glyphs
        assert_eq!(cam.render(), "\u{28C0}\u{28C0}\n\u{2800}\u{2800}\n");
    }

    #[test]
    fn line_off_surface_is_clipped() {
        let mut cam = Camera::new(2, 1);
        cam.begin_path();
        cam.move_to(-0.5, 0.0);
        cam.line_to(-0.5, 4.0);
        cam.stroke();

        assert_eq!(cam.render(), "\u{2800}\u{2800}\n");
    }

    #[test]
    fn begin_path_forgets_segments() {
        let mut cam = Camera::new(2, 1);
        cam.begin_path();
        cam.move_to(0.5, 0.0);
        cam.line_to(0.5, 4.0);
        cam.begin_path();
        cam.stroke();

        assert_eq!(cam.render(), "\u{2800}\u{2800}\n");
    }

    #[test]
    fn glyph_takes_first_lit_color() {
        let mut cam = Camera::new(1, 1);
        cam.set_fill_style(RED);
        cam.fill_rect(0.0, 0.0, 1.0, 1.0);
        cam.set_fill_style(BLUE);
        cam.fill_rect(1.0, 3.0, 1.0, 1.0);
        cam.render();

        assert_eq!(cam.glyph_colors(), &[Some(RED)]);
    }

    #[test]
    fn render_twice_is_stable() {
        let mut cam = Camera::new(3, 2);
        cam.fill_rect(1.0, 1.0, 3.0, 5.0);

        let first = cam.render().to_string();
        let second = cam.render().to_string();

        assert_eq!(first, second);
    }
}
