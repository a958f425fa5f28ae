use std::time::Duration;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::config::IntervalBounds;
use crate::events::SimEvent;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;

/// Cells set alive before the first generation
///
///   . # .
///   . . #
///   # # #
pub const SEED: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

/// What needs repainting after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The grid changed and should be drawn now
    Redraw,

    /// Only the status line changed. Grid changes, if any, show up on the next step.
    Status,

    /// Nothing changed
    Ignored,
}

/// The single owner of the simulation state: the current generation, the pause flag and the
/// step interval.
pub struct Simulation {
    grid: Grid,
    rules: RuleSet,
    paused: bool,

    /// Step interval, in milliseconds
    interval: u64,
    bounds: IntervalBounds,

    generation: u64,
    tile_size: i64,
    density: f64,
    rng: StdRng,
}

impl Simulation {
    /// A simulation on a `width` by `height` grid holding the [`SEED`] pattern
    pub fn new(config: &Config, width: usize, height: usize) -> Self {
        Self::with_rng(config, width, height, StdRng::from_entropy())
    }

    pub fn with_rng(config: &Config, width: usize, height: usize, rng: StdRng) -> Self {
        let mut grid = Grid::new(width, height);

        for (x, y) in SEED {
            if let Err(e) = grid.set(x, y, true) {
                warn!("Seed cell doesn't fit: {e}");
            }
        }

        Self {
            grid,
            rules: B3S23,
            paused: false,
            interval: config.interval.initial,
            bounds: config.interval,
            generation: 0,
            tile_size: config.tile_size.max(1) as i64,
            density: config.density,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Step interval, in milliseconds
    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn interval_duration(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// Number of generations advanced so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation, unless paused. Returns whether the grid changed.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        self.grid = self.grid.next(&self.rules);
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.grid.population(),
            "Advanced"
        );

        true
    }

    /// Handle a single input event
    pub fn apply(&mut self, event: SimEvent) -> Outcome {
        match event {
            SimEvent::Click { px, py } => match self.click(px, py) {
                Ok(_) => Outcome::Redraw,
                Err(e) => {
                    warn!("Dropped click at ({px}, {py}): {e}");
                    Outcome::Ignored
                }
            },
            SimEvent::TogglePause => {
                self.toggle_pause();
                Outcome::Status
            }
            SimEvent::Randomize => {
                self.randomize();
                Outcome::Status
            }
            SimEvent::SpeedUp => {
                self.speed_up();
                Outcome::Status
            }
            SimEvent::SlowDown => {
                self.slow_down();
                Outcome::Status
            }
        }
    }

    /// Flip the cell under the surface pixel `(px, py)`
    pub fn click(&mut self, px: i64, py: i64) -> Result<bool, GridError> {
        let (x, y) = (px.div_euclid(self.tile_size), py.div_euclid(self.tile_size));

        self.toggle_cell(x, y)
    }

    pub fn toggle_cell(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        self.grid.toggle(x, y)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "Pause toggled");
    }

    /// Replace the grid with a random one of the same size
    pub fn randomize(&mut self) {
        let (w, h) = (self.grid.width(), self.grid.height());
        let grid = Grid::random(w, h, self.density, &mut self.rng);

        self.replace_grid(grid);
        info!(population = self.grid.population(), "Randomized");
    }

    /// Swap in a whole new generation. The new grid must have the same dimensions as the old one.
    pub fn replace_grid(&mut self, grid: Grid) {
        debug_assert_eq!(
            (grid.width(), grid.height()),
            (self.grid.width(), self.grid.height()),
            "grid dimensions are fixed"
        );

        self.grid = grid;
    }

    pub fn speed_up(&mut self) {
        self.interval = self.bounds.faster(self.interval);
        info!(interval = self.interval, "Game speed changed");
    }

    pub fn slow_down(&mut self) {
        self.interval = self.bounds.slower(self.interval);
        info!(interval = self.interval, "Game speed changed");
    }
}

/// Decides when the next generation is due.
///
/// This is a one-shot timer that gets re-armed after every tick, so changes to the interval only
/// apply from the next tick on, and time spent stepping and drawing pushes every later tick back.
pub struct Scheduler {
    next_tick: Instant,
}

impl Scheduler {
    /// The first tick is due right away
    pub fn new(now: Instant) -> Self {
        Self { next_tick: now }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// How long to wait for input before the next tick is due
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    /// Arm the timer to fire `interval` after `now`
    pub fn reschedule(&mut self, now: Instant, interval: Duration) {
        self.next_tick = now + interval;
    }

    /// Fire the tick if it's due: advance `sim`, `draw` it if a generation was advanced, then re-arm
    /// with the interval as it is after drawing. A paused simulation still gets re-armed.
    ///
    /// Returns whether the tick fired.
    pub fn run_tick<C, F, E>(&mut self, clock: &C, sim: &mut Simulation, draw: F) -> Result<bool, E>
    where
        C: Clock,
        F: FnOnce(&Simulation) -> Result<(), E>,
    {
        if !self.is_due(clock.now()) {
            return Ok(false);
        }

        if sim.tick() {
            draw(sim)?;
        }

        self.reschedule(clock.now(), sim.interval_duration());

        Ok(true)
    }
}

/// Source of the current time for the [`Scheduler`]
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
