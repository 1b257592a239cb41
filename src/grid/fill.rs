use crate::{
    animation::{actor::Actor, ease::Ease},
    foundation::{
        color::Rgb,
        core::{Cell, TimeMs, Vec2},
        error::TrigridResult,
    },
    grid::{
        model::Grid,
        propagate::{PropagationReport, Wave, nearest_cell, propagate, visitor},
    },
};

/// A single row (`y`) or column (`x`) of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    Row(i32),
    Column(i32),
}

/// Axis a linear gradient advances along. Every line across that axis gets one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientAxis {
    /// Column `x` gets step `x`; `width` steps.
    AlongX,
    /// Row `y` gets step `y`; `height` steps.
    AlongY,
}

/// Transition one cell from its current color to `color`. Out-of-range cells are ignored.
pub fn color_cell(grid: &mut Grid, start: TimeMs, duration: TimeMs, cell: Cell, color: Rgb) {
    if let Some(actor) = grid.actor_mut(cell) {
        let from = actor.color_at(start);
        actor.push_color(Ease::Linear, start, start + duration, from, color);
    }
}

pub fn color_all(grid: &mut Grid, start: TimeMs, duration: TimeMs, color: Rgb) {
    for actor in grid.actors_mut() {
        let from = actor.color_at(start);
        actor.push_color(Ease::Linear, start, start + duration, from, color);
    }
}

/// Color every cell of one row or column. A line outside the grid is a no-op.
pub fn color_line(grid: &mut Grid, start: TimeMs, duration: TimeMs, line: Line, color: Rgb) {
    let cells: Vec<Cell> = match line {
        Line::Row(y) => (0..grid.width() as i32).map(|x| Cell::new(x, y)).collect(),
        Line::Column(x) => (0..grid.height() as i32).map(|y| Cell::new(x, y)).collect(),
    };
    for cell in cells {
        color_cell(grid, start, duration, cell, color);
    }
}

/// Linear color ramp: line `i` gets `a + (b - a) / steps * i` for `i` in `[0, steps)`.
///
/// The last line stops one step short of `b`.
pub fn linear_gradient(
    grid: &mut Grid,
    start: TimeMs,
    duration: TimeMs,
    a: Rgb,
    b: Rgb,
    axis: GradientAxis,
) {
    let steps = match axis {
        GradientAxis::AlongX => grid.width(),
        GradientAxis::AlongY => grid.height(),
    };
    if steps == 0 {
        return;
    }
    let step = (b - a).div_or_self(f64::from(steps));
    for i in 0..steps {
        let color = a + step * f64::from(i);
        let line = match axis {
            GradientAxis::AlongX => Line::Column(i as i32),
            GradientAxis::AlongY => Line::Row(i as i32),
        };
        color_line(grid, start, duration, line, color);
    }
    tracing::debug!(steps, ?axis, "linear gradient applied");
}

/// Quantized falloff from the nearest hotspot.
///
/// Hotspot cells get `a`. Any other cell at tile distance `d` from its nearest hotspot gets
/// `a + (b - a) / steps * d`, or exactly `b` once `d >= steps`. Hotspots off the grid still count
/// as distance sources but are never colored themselves.
pub fn topography(
    grid: &mut Grid,
    start: TimeMs,
    duration: TimeMs,
    a: Rgb,
    b: Rgb,
    steps: u32,
    hotspots: &[Cell],
) {
    let step = (b - a).div_or_self(f64::from(steps));
    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            let cell = Cell::new(x, y);
            let color = if hotspots.contains(&cell) {
                a
            } else {
                match hotspots.iter().map(|h| cell.manhattan(*h)).min() {
                    Some(d) if d < steps => a + step * f64::from(d),
                    _ => b,
                }
            };
            color_cell(grid, start, duration, cell, color);
        }
    }
    tracing::debug!(hotspots = hotspots.len(), steps, "topography applied");
}

/// Beat-synced repetition of a shockwave flash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repeat {
    pub count: u32,
    /// Length of one repetition; the flash itself only takes the wave's step duration.
    pub period: TimeMs,
}

/// Flash `color` outward from the cell nearest `point`, fading each cell back to its current
/// color.
///
/// Cells whose color at the wave start matches `ignore` are walls. With `repeat`, every cell
/// replays the flash in a loop group of `repeat.count` blocks, one per `repeat.period`.
pub fn shockwave_color(
    grid: &mut Grid,
    wave: Wave,
    point: Vec2,
    color: Rgb,
    ignore: Rgb,
    repeat: Option<Repeat>,
) -> TrigridResult<PropagationReport> {
    let Some(seed) = nearest_cell(grid, point, wave.start_time) else {
        return Ok(PropagationReport::default());
    };
    let mut v = visitor(
        |actor: &mut Actor, start: TimeMs, duration: TimeMs| {
            let back = actor.color_at(start);
            match repeat {
                None => {
                    // Wave start times saturate on very large grids.
                    let end = start.saturating_add(duration);
                    actor.push_color(Ease::Linear, start, end, color, back);
                    Ok(())
                }
                Some(r) => {
                    actor.loop_group(start, r.count, |a| {
                        a.push_color(Ease::InBack, 0, duration, color, back);
                        // Instant full-opacity pad stretches the block to one period.
                        a.push_fade(Ease::Linear, r.period, r.period, 1.0, 1.0);
                        Ok(())
                    })
                }
            }
        },
        |actor: &Actor, time: TimeMs| actor.color_at(time).approx_eq(ignore),
    );
    propagate(grid, seed, wave, &mut v)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/fill.rs"]
mod tests;
