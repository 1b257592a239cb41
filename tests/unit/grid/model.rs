use super::*;

fn spec(width: u32, height: u32) -> GridSpec {
    GridSpec {
        width,
        height,
        cell_size: 100.0,
        base_size: 100.0,
        origin: Vec2::new(-130.0, 50.0),
        image_path: "sb/triangle.png".to_owned(),
        start_time: 1_000,
        duration: 5_000,
        initial_color: None,
    }
}

#[test]
fn builds_w_times_h_actors_at_staggered_coordinates() {
    let grid = Grid::build(&spec(4, 3)).unwrap();
    assert_eq!(grid.len(), 12);
    for x in 0..4 {
        for y in 0..3 {
            let actor = grid.actor(Cell::new(x, y)).unwrap();
            assert_eq!(actor.cell(), Cell::new(x, y));
            assert_eq!(
                actor.initial_position(),
                Vec2::new(-130.0 + f64::from(x) * 50.0, 50.0 + f64::from(y) * 100.0)
            );
        }
    }
}

#[test]
fn flip_flags_alternate_in_scan_order() {
    let grid = Grid::build(&spec(3, 3)).unwrap();
    let flags: Vec<bool> = grid.actors().map(|a| a.flip().is_some()).collect();
    assert_eq!(
        flags,
        vec![false, true, false, true, false, true, false, true, false]
    );
    assert!(grid.actor(Cell::new(0, 0)).unwrap().flip().is_none());
    let span = grid.actor(Cell::new(0, 1)).unwrap().flip().unwrap();
    assert_eq!(span, TimeSpan::new(1_000, 6_000));
}

#[test]
fn initial_scale_is_cell_over_base() {
    let mut s = spec(2, 2);
    s.cell_size = 50.0;
    let grid = Grid::build(&s).unwrap();
    assert_eq!(grid.base_scale(), 0.5);
    for actor in grid.actors() {
        assert_eq!(actor.scale_at(1_000), Vec2::new(0.5, 0.5));
    }
}

#[test]
fn optional_seed_color_is_applied() {
    let mut s = spec(1, 2);
    s.initial_color = Some(Hsb::new(0.0, 0.0, 0.5));
    let grid = Grid::build(&s).unwrap();
    for actor in grid.actors() {
        assert_eq!(actor.color_at(1_000), Rgb::grey(0.5));
    }
}

#[test]
fn rejects_non_positive_dimensions() {
    assert!(matches!(
        Grid::build(&spec(0, 3)),
        Err(TrigridError::Config(_))
    ));
    assert!(Grid::build(&spec(3, 0)).is_err());
    let mut s = spec(2, 2);
    s.cell_size = 0.0;
    assert!(Grid::build(&s).is_err());
}

#[test]
fn out_of_range_lookups_are_none() {
    let mut grid = Grid::build(&spec(2, 2)).unwrap();
    assert!(grid.actor(Cell::new(-1, 0)).is_none());
    assert!(grid.actor(Cell::new(2, 0)).is_none());
    assert!(grid.actor_mut(Cell::new(0, 2)).is_none());
    assert!(grid.contains(Cell::new(1, 1)));
}

#[test]
fn rejects_times_beyond_the_supported_range() {
    let mut s = spec(2, 2);
    s.start_time = i64::MAX - 100;
    assert!(matches!(Grid::build(&s), Err(TrigridError::Config(_))));

    let mut s = spec(2, 2);
    s.duration = MAX_TIME_MS + 1;
    assert!(matches!(Grid::build(&s), Err(TrigridError::Config(_))));

    let mut s = spec(2, 2);
    s.start_time = -MAX_TIME_MS;
    s.duration = MAX_TIME_MS;
    Grid::build(&s).unwrap();
}
