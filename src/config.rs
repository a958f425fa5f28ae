use thiserror::Error;

use crate::surface::Rgb;

/// Side length of a tile, in surface pixels (braille dots)
pub const TILE_SIZE: u32 = 4;

/// Step interval at startup, in milliseconds
pub const DEFAULT_INTERVAL: u64 = 1000;
pub const MIN_INTERVAL: u64 = 100;
pub const MAX_INTERVAL: u64 = 2000;

/// How much `+` and `-` change the step interval, in milliseconds
pub const INTERVAL_STEP: u64 = 50;

/// Probability of a cell being alive in a randomized grid
pub const RANDOM_DENSITY: f64 = 0.3;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Tile size must be at least one pixel")]
    ZeroTileSize,

    #[error("Interval range {min}..={max} is empty")]
    EmptyIntervalRange { min: u64, max: u64 },

    #[error("Initial interval {initial} is outside of {min}..={max}")]
    InitialIntervalOutOfRange { initial: u64, min: u64, max: u64 },

    #[error("Interval step must be positive")]
    ZeroIntervalStep,

    #[error("Density {0} is not a probability")]
    InvalidDensity(f64),

    #[error("Line width {0} must be positive")]
    InvalidLineWidth(f64),

    #[error("A {width}x{height} surface can't fit a single {tile_size}px tile")]
    SurfaceTooSmall {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

/// Bounds on the step interval, all in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalBounds {
    pub initial: u64,
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

impl Default for IntervalBounds {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INTERVAL,
            min: MIN_INTERVAL,
            max: MAX_INTERVAL,
            step: INTERVAL_STEP,
        }
    }
}

impl IntervalBounds {
    /// `interval` made one step shorter, never below `min`
    pub fn faster(&self, interval: u64) -> u64 {
        interval.saturating_sub(self.step).max(self.min)
    }

    /// `interval` made one step longer, never above `max`
    pub fn slower(&self, interval: u64) -> u64 {
        interval.saturating_add(self.step).min(self.max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub tile_size: u32,
    pub interval: IntervalBounds,
    pub density: f64,
    pub fill_color: Rgb,
    pub stroke_color: Rgb,
    pub line_width: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            interval: IntervalBounds::default(),
            density: RANDOM_DENSITY,
            fill_color: Rgb::new(100, 240, 150),
            stroke_color: Rgb::new(90, 90, 90),
            line_width: 1.0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let IntervalBounds {
            initial,
            min,
            max,
            step,
        } = self.interval;

        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        if min > max {
            return Err(ConfigError::EmptyIntervalRange { min, max });
        }

        if !(min..=max).contains(&initial) {
            return Err(ConfigError::InitialIntervalOutOfRange { initial, min, max });
        }

        if step == 0 {
            return Err(ConfigError::ZeroIntervalStep);
        }

        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::InvalidDensity(self.density));
        }

        if self.line_width.is_nan() || self.line_width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }

        Ok(())
    }

    /// Number of tiles that fit on a `width` by `height` pixel surface. Partial tiles at the
    /// right and bottom edges are dropped.
    pub fn tiles(&self, width: u32, height: u32) -> Result<(usize, usize), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        let (tiles_x, tiles_y) = (width / self.tile_size, height / self.tile_size);

        if tiles_x == 0 || tiles_y == 0 {
            return Err(ConfigError::SurfaceTooSmall {
                width,
                height,
                tile_size: self.tile_size,
            });
        }

        Ok((tiles_x as usize, tiles_y as usize))
    }
}
