use std::io;
use std::io::Write;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use lifegrid::camera::Camera;
use lifegrid::config::Config;
use lifegrid::events::AppEvent;
use lifegrid::events::Event;
use lifegrid::io::convert_event;
use lifegrid::render::Renderer;
use lifegrid::sim::Outcome;
use lifegrid::sim::Scheduler;
use lifegrid::sim::Clock;
use lifegrid::sim::Simulation;
use lifegrid::sim::SystemClock;
use lifegrid::surface::Surface;

/// Terminal cell where the top left of the surface is drawn
const ORIGIN: (u16, u16) = (0, 0);

/// Rows kept free below the surface for the status line
const STATUS_ROWS: u16 = 1;

/// Puts the terminal into raw mode on an alternate screen with mouse capture, and restores it when
/// dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // from here on, dropping the guard undoes whatever got set up
        let guard = Self;

        execute!(
            out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )
        .context("Failed to set up terminal")?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();

        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Everything the main loop draws to
struct Screen<W: Write> {
    out: W,
    cam: Camera,
    renderer: Renderer,

    /// Terminal row of the status line
    status_row: u16,
    cols: u16,
}

impl<W: Write> Screen<W> {
    /// Render the grid and show it along with the status line
    fn draw(&mut self, sim: &Simulation) -> io::Result<()> {
        self.renderer.draw(&mut self.cam, sim.grid());
        self.cam.render();

        self.present()?;
        self.draw_status(sim)
    }

    /// Print the last rendered frame
    fn present(&mut self) -> io::Result<()> {
        let bw = self.cam.glyph_width();
        let lines = self.cam.frame().lines();
        let colors = self.cam.glyph_colors().chunks(bw);

        for (row, (line, colors)) in lines.zip(colors).enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(ORIGIN.0, ORIGIN.1 + row as u16),
                style::ResetColor
            )?;

            let mut current = None;
            for (c, &color) in line.chars().zip(colors) {
                if color != current {
                    let fg = color.map_or(Color::Reset, Color::from);
                    queue!(self.out, style::SetForegroundColor(fg))?;
                    current = color;
                }

                queue!(self.out, style::Print(c))?;
            }
        }

        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }

    fn draw_status(&mut self, sim: &Simulation) -> io::Result<()> {
        let state = if sim.is_paused() { "paused" } else { "running" };
        let status = format!(
            " gen {} | {} ms | {} | p pause  r random  +/- speed  q quit",
            sim.generation(),
            sim.interval(),
            state
        );
        let status: String = status.chars().take(self.cols as usize).collect();

        queue!(
            self.out,
            cursor::MoveTo(0, self.status_row),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(status),
        )?;
        self.out.flush()
    }

    fn redraw_all(&mut self, sim: &Simulation) -> io::Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;

        self.present()?;
        self.draw_status(sim)
    }
}

fn init_tracing() {
    // The screen belongs to the simulation, so logs are off unless asked for. Redirect stderr when
    // turning them on.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn run<W: Write>(screen: &mut Screen<W>, sim: &mut Simulation) -> anyhow::Result<()> {
    let mut scheduler = Scheduler::new(SystemClock.now());

    loop {
        // Wait for input for as long as the next tick allows
        let timeout = scheduler.time_until_tick(SystemClock.now());

        if event::poll(timeout).context("Failed to poll for events")? {
            let event = event::read().context("Failed to read event")?;

            match convert_event(event, ORIGIN) {
                None => {}
                Some(Event::App(AppEvent::Exit)) => break,
                Some(Event::App(AppEvent::Resize { cols, rows })) => {
                    warn!("Terminal resized to {cols}x{rows}, the grid keeps its size");
                    screen.redraw_all(sim)?;
                }
                Some(Event::Sim(event)) => match sim.apply(event) {
                    Outcome::Redraw => screen.draw(sim)?,
                    Outcome::Status => screen.draw_status(sim)?,
                    Outcome::Ignored => {}
                },
            }

            continue;
        }

        scheduler.run_tick(&SystemClock, sim, |sim| screen.draw(sim))?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::default();
    config.validate().context("Invalid configuration")?;

    let (cols, rows) = terminal::size().context("Failed to get terminal size")?;
    let surface_rows = rows.saturating_sub(STATUS_ROWS);

    let mut cam = Camera::new(cols, surface_rows);
    let (tiles_x, tiles_y) = config
        .tiles(cam.width(), cam.height())
        .context("Terminal is too small")?;

    info!(
        cols,
        rows,
        tiles_x,
        tiles_y,
        "Starting simulation"
    );

    let renderer = Renderer::new(&mut cam, &config);
    let mut sim = Simulation::new(&config, tiles_x, tiles_y);

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let mut screen = Screen {
        out: stdout,
        cam,
        renderer,
        status_row: ORIGIN.1 + surface_rows,
        cols,
    };

    run(&mut screen, &mut sim)
}
