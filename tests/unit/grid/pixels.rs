use super::*;
use crate::{foundation::core::Vec2, grid::model::GridSpec};

fn grid(width: u32, height: u32) -> Grid {
    Grid::build(&GridSpec {
        width,
        height,
        cell_size: 100.0,
        base_size: 100.0,
        origin: Vec2::ZERO,
        image_path: "sb/triangle.png".to_owned(),
        start_time: 0,
        duration: 1_000,
        initial_color: None,
    })
    .unwrap()
}

fn quadrants() -> image::RgbaImage {
    image::RgbaImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
        (true, true) => image::Rgba([255, 0, 0, 255]),
        (false, true) => image::Rgba([0, 255, 0, 255]),
        (true, false) => image::Rgba([0, 0, 255, 255]),
        (false, false) => image::Rgba([0, 0, 0, 255]),
    })
}

#[test]
fn rgba_image_reads_pixels_and_rejects_out_of_range() {
    let img = quadrants();
    assert_eq!(PixelSource::width(&img), 4);
    let green = Rgb::new(0.0, 1.0, 0.0);
    assert_eq!(PixelSource::pixel(&img, 3, 0), Some(green));
    assert_eq!(PixelSource::pixel(&img, 4, 0), None);
}

#[test]
fn cells_map_proportionally_onto_the_image() {
    let g = grid(2, 2);
    let img = quadrants();
    assert_eq!(sample_point(&g, &img, Cell::new(1, 1)), Some((2, 2)));
    assert_eq!(sample_point(&g, &img, Cell::new(0, 1)), Some((0, 2)));
    assert_eq!(sample_point(&g, &img, Cell::new(2, 0)), None);
}

#[test]
fn pixel_fill_colors_every_cell() {
    let mut g = grid(2, 2);
    let img = quadrants();
    assert_eq!(color_from_pixels(&mut g, 0, 100, &img), 4);

    let at = |x, y| g.actor(Cell::new(x, y)).unwrap().color_at(100);
    assert_eq!(at(0, 0), Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(at(1, 0), Rgb::new(0.0, 1.0, 0.0));
    assert_eq!(at(0, 1), Rgb::new(0.0, 0.0, 1.0));
    assert_eq!(at(1, 1), Rgb::BLACK);
}

#[test]
fn empty_image_leaves_grid_untouched() {
    let mut g = grid(2, 1);
    let img = image::RgbaImage::new(0, 0);
    assert_eq!(color_from_pixels(&mut g, 0, 100, &img), 0);
    assert_eq!(g.actor(Cell::new(0, 0)).unwrap().color_at(100), Rgb::WHITE);
}
