use crate::{
    animation::ease::Ease,
    foundation::{
        color::Hsb,
        core::{TimeMs, Vec2, polar_rotation},
        error::TrigridResult,
        rng::GenRng,
    },
    grid::model::Grid,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Entry,
    Exit,
}

/// Axis collapsed to zero by a scale flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    X,
    Y,
}

/// Scale every cell to `scale`, moving positions proportionally so the tiling stays closed.
///
/// Positions scale about the screen origin. Cells whose current scale is zero only rescale.
pub fn scale_grid(grid: &mut Grid, start: TimeMs, end: TimeMs, scale: f64) {
    for actor in grid.actors_mut() {
        let from_scale = actor.scale_at(start);
        let from_pos = actor.position_at(start);
        actor.push_scale(
            Ease::Linear,
            start,
            end,
            from_scale,
            Vec2::new(scale, scale),
        );
        if from_scale.x != 0.0 {
            let to_pos = from_pos * (scale / from_scale.x);
            actor.push_move(Ease::Linear, start, end, from_pos, to_pos);
        }
    }
}

/// Rotate every cell to `radians` and swing its position around the screen origin by the same
/// angle.
pub fn rotate_grid(grid: &mut Grid, start: TimeMs, end: TimeMs, radians: f64) {
    for actor in grid.actors_mut() {
        let from_rot = actor.rotation_at(start);
        let from_pos = actor.position_at(start);
        actor.push_rotate(Ease::Linear, start, end, from_rot, radians);
        actor.push_move(
            Ease::Linear,
            start,
            end,
            from_pos,
            polar_rotation(from_pos, radians),
        );
    }
}

/// Fade in from transparent, or out from the current opacity.
pub fn fade(grid: &mut Grid, start: TimeMs, duration: TimeMs, transition: Transition) {
    for actor in grid.actors_mut() {
        let (from, to) = match transition {
            Transition::Entry => (0.0, 1.0),
            Transition::Exit => (actor.opacity_at(start), 0.0),
        };
        actor.push_fade(Ease::Linear, start, start + duration, from, to);
    }
}

/// Grow every cell out of (entry) or collapse it into (exit) a zero-width line along `axis`.
pub fn scale_flip(
    grid: &mut Grid,
    start: TimeMs,
    duration: TimeMs,
    transition: Transition,
    axis: FlipAxis,
) {
    let s = grid.base_scale();
    let full = Vec2::new(s, s);
    let flat = match axis {
        FlipAxis::X => Vec2::new(0.0, s),
        FlipAxis::Y => Vec2::new(s, 0.0),
    };
    let (from, to) = match transition {
        Transition::Entry => (flat, full),
        Transition::Exit => (full, flat),
    };
    for actor in grid.actors_mut() {
        actor.push_scale(Ease::Linear, start, start + duration, from, to);
    }
}

/// Ranges glitter colors are drawn from (integer draws, upper bounds exclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlitterPalette {
    /// Hue in degrees.
    pub hue: (i32, i32),
    /// Saturation in percent.
    pub saturation: (i32, i32),
    /// Brightness in tenths.
    pub brightness: (i32, i32),
}

impl Default for GlitterPalette {
    fn default() -> Self {
        Self {
            hue: (180, 240),
            saturation: (40, 100),
            brightness: (1, 10),
        }
    }
}

impl GlitterPalette {
    fn draw(&self, rng: &mut GenRng) -> Hsb {
        let h = rng.range_i32(self.hue.0, self.hue.1);
        let s = rng.range_i32(self.saturation.0, self.saturation.1);
        let b = rng.range_i32(self.brightness.0, self.brightness.1);
        Hsb::new(f64::from(h), f64::from(s) * 0.01, f64::from(b) * 0.1)
    }
}

/// Each cell flashes to a random color and back, `loop_count` times, with a random easing.
pub fn glitter(
    grid: &mut Grid,
    rng: &mut GenRng,
    palette: &GlitterPalette,
    start: TimeMs,
    duration: TimeMs,
    loop_count: u32,
) -> TrigridResult<()> {
    let half = duration / 2;
    for actor in grid.actors_mut() {
        let ease = rng.pick(&Ease::ALL).copied().unwrap_or_default();
        let base = actor.color_at(start);
        let flash = palette.draw(rng).to_rgb();
        actor.loop_group(start, loop_count, |a| {
            a.push_color(ease, 0, half, base, flash);
            a.push_color(ease, half, duration, flash, base);
            Ok(())
        })?;
    }
    tracing::debug!(start, duration, loop_count, "glitter applied");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/grid/motion.rs"]
mod tests;
