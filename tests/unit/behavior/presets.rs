use super::*;
use crate::{
    animation::actor::TimelineItem,
    behavior::{config::GeneratorConfig, session::Generation},
    grid::pixels::PixelSource,
};

fn config(behavior: Behavior, width: u32, height: u32) -> GeneratorConfig {
    GeneratorConfig {
        behavior,
        grid_width: width,
        grid_height: height,
        ..Default::default()
    }
}

fn run_on(cfg: &GeneratorConfig) -> Grid {
    let mut ctx = Generation::new(cfg, None).unwrap();
    run(cfg.behavior, &mut ctx).unwrap();
    ctx.grid
}

fn loop_counts(grid: &Grid, cell: Cell) -> Vec<u32> {
    grid.actor(cell)
        .unwrap()
        .timeline()
        .iter()
        .filter_map(|item| match item {
            TimelineItem::Loop(g) => Some(g.count),
            TimelineItem::Command(_) => None,
        })
        .collect()
}

#[test]
fn fallback_flips_in_on_y_and_out_on_x() {
    let cfg = config(Behavior::Fallback, 4, 3);
    let grid = run_on(&cfg);
    let s = cfg.start_time;
    assert_eq!(grid.len(), 12);
    for actor in grid.actors() {
        assert_eq!(actor.scale_at(s), Vec2::new(1.0, 0.0));
        assert_eq!(actor.scale_at(s + 500), Vec2::new(1.0, 1.0));
        let gone = s + cfg.duration + 1_000;
        assert_eq!(actor.scale_at(gone), Vec2::new(0.0, 1.0));
        assert_eq!(
            actor.rotation_at(s + cfg.duration + 500),
            degrees_to_radians(45.0)
        );
    }
}

#[test]
fn fallback_grey_lines_wall_off_the_shockwave() {
    let cfg = config(Behavior::Fallback, 4, 3);
    let grid = run_on(&cfg);
    let s = cfg.start_time;
    // Column 1 (height / 2) is grey and is never flashed white.
    for y in 0..3 {
        let actor = grid.actor(Cell::new(1, y)).unwrap();
        assert!(actor.color_at(s + 500).approx_eq(Rgb::grey(0.5)));
    }
    // The seed sits on the shockwave point and flashes white.
    let seed = grid.actor(Cell::new(0, 0)).unwrap();
    assert_eq!(seed.color_at(s + 500), Rgb::WHITE);
}

#[test]
fn test_gradient_ramps_columns_and_fades_out() {
    let cfg = config(Behavior::TestGradient, 4, 1);
    let grid = run_on(&cfg);
    let s = cfg.start_time;
    let last = grid.actor(Cell::new(3, 0)).unwrap();
    assert!(
        grid.actor(Cell::new(0, 0))
            .unwrap()
            .color_at(s)
            .approx_eq(Rgb::grey(0.1))
    );
    assert!(last.color_at(s).approx_eq(Rgb::grey(0.775)));
    assert_eq!(last.opacity_at(s + cfg.duration), 1.0);
    assert_eq!(last.opacity_at(s + cfg.duration + 500), 0.0);
}

#[test]
fn verse_collapses_the_hotspot_block() {
    let cfg = config(Behavior::Verse, 40, 10);
    let grid = run_on(&cfg);
    let s = cfg.start_time;

    let seed = grid.actor(Cell::new(14, 2)).unwrap();
    assert_eq!(seed.scale_at(s + 1_200), Vec2::new(0.0, 1.0));
    // Far corner of the block: 9 tiles from the seed.
    let corner = grid.actor(Cell::new(20, 5)).unwrap();
    assert_eq!(corner.scale_at(s + 600 + 9 * 75 + 600), Vec2::new(0.0, 1.0));
    // Outside the block the wave never arrives.
    let outside = grid.actor(Cell::new(0, 0)).unwrap();
    assert_eq!(outside.scale_at(s + 2_000), Vec2::new(1.0, 1.0));
}

#[test]
fn verse_glitters_four_times_per_cell() {
    let cfg = config(Behavior::Verse, 40, 10);
    let grid = run_on(&cfg);
    assert_eq!(loop_counts(&grid, Cell::new(0, 0)), vec![3, 3, 3, 3]);
}

#[test]
fn verse_without_in_grid_hotspots_still_runs() {
    let cfg = config(Behavior::Verse, 4, 3);
    let grid = run_on(&cfg);
    assert_eq!(grid.len(), 12);
    for actor in grid.actors() {
        assert_eq!(actor.scale_at(cfg.start_time + 600), Vec2::new(1.0, 1.0));
    }
}

#[test]
fn verse_hotspot_layout_matches_grid_center() {
    let cells = verse_hotspots(40, 10);
    assert_eq!(cells.len(), 28);
    assert_eq!(cells[0], Cell::new(14, 2));
    assert_eq!(cells.last(), Some(&Cell::new(20, 5)));
    assert!(verse_hotspots(4, 3).is_empty());
}

#[test]
fn guitar_solo_leaves_hot_cells_alone() {
    let cfg = config(Behavior::GuitarSolo, 20, 6);
    let grid = run_on(&cfg);
    for cell in SOLO_POINTS {
        assert!(loop_counts(&grid, cell).is_empty(), "{cell:?}");
        let actor = grid.actor(cell).unwrap();
        let hot = Rgb::new(0.8, 0.1, 0.1);
        assert!(actor.color_at(cfg.start_time).approx_eq(hot));
    }
    let counts = loop_counts(&grid, Cell::new(0, 0));
    assert!(counts.contains(&4));
    assert!(counts.contains(&8));
    assert!(loop_counts(&grid, Cell::new(9, 2)).contains(&4));
}

#[test]
fn finale_replays_the_flash_every_measure() {
    let cfg = config(Behavior::Finale, 4, 3);
    let grid = run_on(&cfg);
    let s = cfg.start_time;
    for actor in grid.actors() {
        assert_eq!(loop_counts(&grid, actor.cell()), vec![4]);
    }
    let seed = grid.actor(Cell::new(0, 0)).unwrap();
    assert_eq!(seed.color_at(s + 300), Rgb::grey(0.09));
    assert_eq!(seed.color_at(s + cfg.measure_ms), Rgb::WHITE);
}

#[test]
fn image_mosaic_requires_pixels() {
    let cfg = config(Behavior::ImageMosaic, 2, 2);
    let err = Generation::new(&cfg, None).err().unwrap();
    assert!(matches!(err, TrigridError::Config(_)));
}

#[test]
fn image_mosaic_colors_from_the_image() {
    let cfg = config(Behavior::ImageMosaic, 2, 2);
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
    let mut ctx = Generation::new(&cfg, Some(&img)).unwrap();
    run(cfg.behavior, &mut ctx).unwrap();
    for actor in ctx.grid.actors() {
        assert_eq!(actor.color_at(cfg.start_time + 500), Rgb::BLACK);
    }
}

#[test]
fn guitar_solo_drops_layout_cells_outside_the_grid() {
    let cfg = config(Behavior::GuitarSolo, 4, 3);
    let grid = run_on(&cfg);
    for actor in grid.actors() {
        assert_eq!(actor.color_at(cfg.start_time), Rgb::grey(0.1));
        assert!(loop_counts(&grid, actor.cell()).is_empty());
    }
}

#[test]
fn hotspot_filter_keeps_only_in_grid_cells() {
    let cfg = config(Behavior::GuitarSolo, 12, 5);
    let grid = Grid::build(&cfg.grid_spec()).unwrap();
    let kept = in_grid(&grid, SOLO_POINTS.to_vec(), Behavior::GuitarSolo);
    assert_eq!(kept.len(), 11);
    assert!(kept.iter().all(|c| grid.contains(*c)));
    assert!(kept.contains(&SOLO_POINTS[SOLO_PIVOT]));
}

#[test]
fn every_behavior_writes_in_range_colors() {
    let img = image::RgbaImage::from_fn(8, 8, |x, y| {
        image::Rgba([(x * 30) as u8, (y * 30) as u8, 255, 255])
    });
    let in_range = |v: f64| (-1e-9..=1.0 + 1e-9).contains(&v);
    for behavior in Behavior::ALL {
        let mut cfg = config(behavior, 20, 6);
        cfg.fallback_glitter = true;
        let pixels = behavior.needs_pixels().then_some(&img as &dyn PixelSource);
        let mut ctx = Generation::new(&cfg, pixels).unwrap();
        run(behavior, &mut ctx).unwrap();
        for actor in ctx.grid.actors() {
            for command in actor.flattened() {
                if let crate::animation::command::Command::Color(k) = command {
                    for c in [k.from, k.to] {
                        assert!(
                            in_range(c.r) && in_range(c.g) && in_range(c.b),
                            "{behavior}: {c:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn fallback_glitter_is_opt_in() {
    let loops = |grid: &Grid| -> Vec<u32> {
        grid.actors()
            .flat_map(|a| a.timeline())
            .filter_map(|item| match item {
                TimelineItem::Loop(g) => Some(g.count),
                TimelineItem::Command(_) => None,
            })
            .collect()
    };
    let mut cfg = config(Behavior::Fallback, 4, 3);
    assert!(loops(&run_on(&cfg)).is_empty());

    cfg.fallback_glitter = true;
    let grid = run_on(&cfg);
    assert_eq!(loops(&grid), vec![cfg.glitter_count; grid.len()]);
}
