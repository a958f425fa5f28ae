use crate::config::Config;
use crate::grid::Grid;
use crate::surface::Surface;

/// Draws a [`Grid`] and its gridlines onto a [`Surface`]
pub struct Renderer {
    tile_size: f64,
}

impl Renderer {
    /// Set up `surface` with the colors and line width from `config`. These are only ever set here.
    pub fn new<S: Surface>(surface: &mut S, config: &Config) -> Self {
        surface.set_fill_style(config.fill_color);
        surface.set_stroke_style(config.stroke_color);
        surface.set_line_width(config.line_width);

        Self {
            tile_size: config.tile_size as f64,
        }
    }

    /// Redraw the whole surface from scratch
    pub fn draw<S: Surface>(&self, surface: &mut S, grid: &Grid) {
        surface.clear();
        self.draw_cells(surface, grid);
        self.draw_gridlines(surface, grid);
    }

    fn draw_cells<S: Surface>(&self, surface: &mut S, grid: &Grid) {
        let ts = self.tile_size;

        for (x, y) in grid.live_cells() {
            surface.fill_rect(x as f64 * ts, y as f64 * ts, ts, ts);
        }
    }

    // Lines sit half a pixel before each tile boundary so they land on a single column (or row)
    // of pixels instead of straddling two.
    fn draw_gridlines<S: Surface>(&self, surface: &mut S, grid: &Grid) {
        let ts = self.tile_size;
        let (w, h) = (surface.width() as f64, surface.height() as f64);

        // vertical lines
        for i in 0..grid.width() {
            let x = i as f64 * ts - 0.5;

            surface.begin_path();
            surface.move_to(x, 0.0);
            surface.line_to(x, h);
            surface.stroke();
        }

        // horizontal lines
        for j in 0..grid.height() {
            let y = j as f64 * ts - 0.5;

            surface.begin_path();
            surface.move_to(0.0, y);
            surface.line_to(w, y);
            surface.stroke();
        }
    }
}
