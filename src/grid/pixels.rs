use crate::{
    foundation::{
        color::Rgb,
        core::{Cell, TimeMs},
    },
    grid::{fill::color_cell, model::Grid},
};

/// Read-only 2-D color lookup, e.g. a decoded image.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// `None` outside the source.
    fn pixel(&self, x: u32, y: u32) -> Option<Rgb>;
}

impl PixelSource for image::RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_pixel_checked(x, y)
            .map(|p| Rgb::from_rgb8(p.0[0], p.0[1], p.0[2]))
    }
}

/// Source pixel sampled for `cell`: the grid is stretched over the whole image.
pub fn sample_point(grid: &Grid, source: &dyn PixelSource, cell: Cell) -> Option<(u32, u32)> {
    if !grid.contains(cell) || source.width() == 0 || source.height() == 0 {
        return None;
    }
    let px = u64::from(cell.x as u32) * u64::from(source.width()) / u64::from(grid.width());
    let py = u64::from(cell.y as u32) * u64::from(source.height()) / u64::from(grid.height());
    Some((px as u32, py as u32))
}

/// Color every cell from the pixel at its proportional position in `source`.
///
/// Returns the number of cells colored. Cells without a pixel keep their color.
#[tracing::instrument(skip(grid, source), fields(src_w = source.width(), src_h = source.height()))]
pub fn color_from_pixels(
    grid: &mut Grid,
    start: TimeMs,
    duration: TimeMs,
    source: &dyn PixelSource,
) -> usize {
    let cells: Vec<Cell> = grid.actors().map(|a| a.cell()).collect();
    let mut colored = 0;
    for cell in cells {
        let Some(color) = sample_point(grid, source, cell).and_then(|(x, y)| source.pixel(x, y))
        else {
            continue;
        };
        color_cell(grid, start, duration, cell, color);
        colored += 1;
    }
    tracing::debug!(colored, "pixel fill applied");
    colored
}

#[cfg(test)]
#[path = "../../tests/unit/grid/pixels.rs"]
mod tests;
