use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use lifegrid::camera::Camera;
use lifegrid::config::Config;
use lifegrid::events::SimEvent;
use lifegrid::grid::Grid;
use lifegrid::render::Renderer;
use lifegrid::rule_set::B3S23;
use lifegrid::sim::Simulation;

fn grid_with(width: usize, height: usize, cells: &[(usize, usize)]) -> anyhow::Result<Grid> {
    let mut grid = Grid::new(width, height);
    for &(x, y) in cells {
        grid.set(x, y, true)?;
    }

    Ok(grid)
}

fn seeded_sim(width: usize, height: usize) -> Simulation {
    Simulation::with_rng(&Config::default(), width, height, StdRng::seed_from_u64(3))
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<bool>(), w * h).prop_map(move |cells| {
            let mut grid = Grid::new(w, h);
            for (i, alive) in cells.into_iter().enumerate() {
                grid.set(i % w, i / w, alive).unwrap();
            }
            grid
        })
    })
}

/// Copy of `grid` surrounded by a one cell border of dead cells
fn padded(grid: &Grid) -> Grid {
    let mut out = Grid::new(grid.width() + 2, grid.height() + 2);
    for (x, y) in grid.live_cells() {
        out.set(x + 1, y + 1, true).unwrap();
    }
    out
}

#[test]
fn test_blinker() -> anyhow::Result<()> {
    let vertical = grid_with(5, 5, &[(1, 0), (1, 1), (1, 2)])?;

    let horizontal = vertical.next(&B3S23);
    insta::assert_snapshot!(horizontal.to_string().trim_end(), @r"
.....
###..
.....
.....
.....
");
    assert_eq!(horizontal, grid_with(5, 5, &[(0, 1), (1, 1), (2, 1)])?);

    assert_eq!(horizontal.next(&B3S23), vertical);

    Ok(())
}

#[test]
fn test_seed_glides() {
    let mut sim = seeded_sim(6, 6);
    insta::assert_snapshot!(sim.grid().to_string().trim_end(), @r"
.#....
..#...
###...
......
......
......
");

    for _ in 0..4 {
        assert!(sim.tick());
    }

    insta::assert_snapshot!(sim.grid().to_string().trim_end(), @r"
......
..#...
...#..
.###..
......
......
");
    assert_eq!(sim.generation(), 4);
}

#[test]
fn test_dead_grid_stays_dead() {
    let grid = Grid::new(10, 7);

    assert_eq!(grid.next(&B3S23), grid);
}

#[test]
fn test_pause_twice() {
    let mut sim = seeded_sim(8, 8);
    let before = sim.grid().clone();

    sim.apply(SimEvent::TogglePause);
    for _ in 0..3 {
        assert!(!sim.tick());
    }
    sim.apply(SimEvent::TogglePause);

    assert!(!sim.is_paused());
    assert_eq!(sim.grid(), &before);
    assert_eq!(sim.generation(), 0);
}

#[test]
fn test_interval_presses() {
    let mut sim = seeded_sim(4, 4);
    for _ in 0..5 {
        sim.apply(SimEvent::SpeedUp);
    }
    assert_eq!(sim.interval(), 750);

    let mut sim = seeded_sim(4, 4);
    for _ in 0..5 {
        sim.apply(SimEvent::SlowDown);
    }
    assert_eq!(sim.interval(), 1250);
}

#[test]
fn test_click_then_render() {
    let config = Config::default();
    let mut cam = Camera::new(8, 2);
    let renderer = Renderer::new(&mut cam, &config);

    // 16x8 pixels is 4x2 tiles
    let mut sim = seeded_sim(4, 2);
    sim.apply(SimEvent::Click { px: 13, py: 5 });
    renderer.draw(&mut cam, sim.grid());

    // tile (3, 1) covers pixels 12..16 x 4..8, minus the gridline at x = 11 and y = 3
    assert_eq!(cam.pixel(13, 5), Some(config.fill_color));
    assert_eq!(cam.pixel(12, 4), Some(config.fill_color));
    assert_eq!(cam.pixel(11, 5), Some(config.stroke_color));
    assert_eq!(cam.pixel(13, 3), Some(config.stroke_color));
}

proptest! {
    #[test]
    fn prop_neighbors_in_range(grid in arb_grid()) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                prop_assert!(grid.neighbors(x, y) <= 8);
            }
        }
    }

    #[test]
    fn prop_edges_are_dead(grid in arb_grid()) {
        let pad = padded(&grid);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                prop_assert_eq!(grid.neighbors(x, y), pad.neighbors(x + 1, y + 1));
            }
        }
    }

    #[test]
    fn prop_step_reads_previous_generation(grid in arb_grid()) {
        let next = grid.next(&B3S23);

        prop_assert_eq!((next.width(), next.height()), (grid.width(), grid.height()));

        // visit cells back to front; results must not depend on order
        for y in (0..grid.height()).rev() {
            for x in (0..grid.width()).rev() {
                let alive = grid.get(x, y) == Some(true);
                let n = grid.neighbors(x, y);
                let want = matches!((alive, n), (true, 2) | (true, 3) | (false, 3));

                prop_assert_eq!(next.get(x, y), Some(want), "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn prop_step_matches_padded(grid in arb_grid()) {
        let next = padded(&grid.next(&B3S23));
        let pad_next = padded(&grid).next(&B3S23);

        // births in the border are the only difference allowed
        for (x, y) in next.live_cells() {
            prop_assert_eq!(pad_next.get(x, y), Some(true));
        }
        for (x, y) in pad_next.live_cells() {
            let on_border = x == 0 || y == 0 || x == grid.width() + 1 || y == grid.height() + 1;
            prop_assert!(on_border || next.get(x, y) == Some(true));
        }
    }

    #[test]
    fn prop_render_idempotent(grid in arb_grid()) {
        let config = Config::default();
        let (cols, rows) = (grid.width() as u16 * 2, grid.height() as u16);
        let mut cam = Camera::new(cols, rows);
        let renderer = Renderer::new(&mut cam, &config);

        renderer.draw(&mut cam, &grid);
        let first = cam.render().to_string();
        let first_colors = cam.glyph_colors().to_vec();

        renderer.draw(&mut cam, &grid);
        prop_assert_eq!(cam.render(), first.as_str());
        prop_assert_eq!(cam.glyph_colors(), first_colors.as_slice());
    }
}
