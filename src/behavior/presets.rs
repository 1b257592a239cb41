//! Hand-authored effect sequences, one per [`Behavior`].
//!
//! Each behavior receives a freshly built grid and owns it for the rest of the pass.

use crate::{
    animation::{actor::Actor, ease::Ease},
    behavior::{config::Behavior, session::Generation},
    foundation::{
        color::Rgb,
        core::{Cell, TimeMs, Vec2, degrees_to_radians},
        error::{TrigridError, TrigridResult},
    },
    grid::{
        fill::{
            GradientAxis, Line, Repeat, color_all, color_line, linear_gradient, shockwave_color,
            topography,
        },
        model::Grid,
        motion::{FlipAxis, GlitterPalette, Transition, fade, glitter, rotate_grid, scale_flip},
        pixels::color_from_pixels,
        propagate::{Wave, propagate_from, visitor},
    },
};

const VERSE_PALETTE: [(f64, f64, f64); 5] = [
    (39.0, 40.0, 56.0),
    (93.0, 83.0, 107.0),
    (125.0, 107.0, 145.0),
    (165.0, 148.0, 249.0),
    (52.0, 127.0, 196.0),
];

const SOLO_POINTS: [Cell; 16] = [
    Cell::new(8, 0),
    Cell::new(9, 0),
    Cell::new(10, 0),
    Cell::new(7, 1),
    Cell::new(11, 1),
    Cell::new(4, 2),
    Cell::new(5, 2),
    Cell::new(6, 2),
    Cell::new(12, 2),
    Cell::new(13, 2),
    Cell::new(14, 2),
    Cell::new(5, 3),
    Cell::new(9, 3),
    Cell::new(13, 3),
    Cell::new(4, 4),
    Cell::new(14, 4),
];

/// Index into the solo layout of the cell the solo waves are timed from.
const SOLO_PIVOT: usize = 12;

pub fn run(behavior: Behavior, ctx: &mut Generation<'_>) -> TrigridResult<()> {
    match behavior {
        Behavior::Fallback => fallback(ctx),
        Behavior::TestGradient => test_gradient(ctx),
        Behavior::Verse => verse(ctx),
        Behavior::GuitarSolo => guitar_solo(ctx),
        Behavior::Finale => finale(ctx),
        Behavior::ImageMosaic => image_mosaic(ctx),
    }
}

/// Gradient-striped grid that rotates, flashes a shockwave, then flips away.
///
/// `fallback_glitter` adds a glitter pass before the exit flip.
#[tracing::instrument(skip(ctx))]
pub fn fallback(ctx: &mut Generation<'_>) -> TrigridResult<()> {
    let cfg = ctx.config;
    let (s, d) = (cfg.start_time, cfg.duration);
    let grid = &mut ctx.grid;
    let olive = Rgb::new(0.5, 0.6, 0.1);
    let mid = Rgb::grey(0.5);

    scale_flip(grid, s, 500, Transition::Entry, FlipAxis::Y);
    linear_gradient(
        grid,
        s,
        1,
        olive,
        Rgb::new(1.0, 0.0, 0.0),
        GradientAxis::AlongX,
    );
    let h = grid.height();
    color_line(grid, s + 2, 1, Line::Column((h / 2) as i32), mid);
    color_line(grid, s + 2, 1, Line::Row((f64::from(h) / 1.3) as i32), mid);
    linear_gradient(
        grid,
        s + d / 2,
        1_000,
        olive,
        Rgb::new(0.1, 0.3, 0.5),
        GradientAxis::AlongY,
    );
    let angle = degrees_to_radians(cfg.angle_rotation);
    rotate_grid(grid, s + 500, s + d + 500, angle);
    shockwave_color(
        grid,
        Wave {
            start_time: s + 500,
            delay_per_step: cfg.shockwave_delay_time,
            step_duration: cfg.shockwave_step_time,
        },
        cfg.shockwave_point,
        Rgb::WHITE,
        mid,
        None,
    )?;
    if cfg.fallback_glitter {
        glitter(
            grid,
            &mut ctx.rng,
            &GlitterPalette::default(),
            s + d,
            d / 10,
            cfg.glitter_count,
        )?;
    }
    scale_flip(grid, s + d + 500, 500, Transition::Exit, FlipAxis::X);
    Ok(())
}

/// Near-black to white ramp across the columns.
#[tracing::instrument(skip(ctx))]
pub fn test_gradient(ctx: &mut Generation<'_>) -> TrigridResult<()> {
    let cfg = ctx.config;
    let (s, d) = (cfg.start_time, cfg.duration);
    let grid = &mut ctx.grid;

    scale_flip(grid, s, 100, Transition::Entry, FlipAxis::Y);
    linear_gradient(
        grid,
        s,
        0,
        Rgb::grey(0.1),
        Rgb::WHITE,
        GradientAxis::AlongX,
    );
    fade(grid, s + d, 500, Transition::Exit);
    Ok(())
}

/// Central block of the grid for the verse layout, shifted two columns left.
fn verse_hotspots(width: u32, height: u32) -> Vec<Cell> {
    let (w, h) = (width as i32, height as i32);
    let mut out = Vec::new();
    for i in (w / 2 - w / 10)..(w / 2 + w / 10 - 1) {
        for j in (h / 5)..(h / 5) * 3 {
            out.push(Cell::new(i - 2, j));
        }
    }
    out
}

/// Keep the in-grid hotspots, warning about any that were dropped.
fn in_grid(grid: &Grid, cells: Vec<Cell>, behavior: Behavior) -> Vec<Cell> {
    let total = cells.len();
    let kept: Vec<Cell> = cells.into_iter().filter(|c| grid.contains(*c)).collect();
    if kept.len() < total {
        tracing::warn!(
            %behavior,
            skipped = total - kept.len(),
            width = grid.width(),
            height = grid.height(),
            "hotspots outside the grid were skipped"
        );
    }
    kept
}

/// Palette topography around a hotspot block that cycles colors every quarter, glitters, and
/// collapses the hotspot cells with a bouncing wave.
#[tracing::instrument(skip(ctx))]
pub fn verse(ctx: &mut Generation<'_>) -> TrigridResult<()> {
    let cfg = ctx.config;
    let (s, d) = (cfg.start_time, cfg.duration);
    let palette = VERSE_PALETTE.map(|(r, g, b)| Rgb::from_255(r, g, b));
    let layout = cfg
        .hotspots
        .clone()
        .unwrap_or_else(|| verse_hotspots(ctx.grid.width(), ctx.grid.height()));
    let hotspots = in_grid(&ctx.grid, layout, Behavior::Verse);
    let glitters = GlitterPalette::default();

    let mut marker = ctx.rng.range_i32(0, 4) as usize;
    let mut points = 8;
    let mut grey = 0.4;

    topography(
        &mut ctx.grid,
        s,
        0,
        palette[marker],
        Rgb::grey(grey),
        points,
        &hotspots,
    );
    scale_flip(&mut ctx.grid, s, 600, Transition::Entry, FlipAxis::X);

    // The wall test reads colors, so the wave goes in before the first glitter does.
    if let Some(&first) = hotspots.first() {
        let base = ctx.grid.base_scale();
        let hot = palette[marker];
        let mut collapse = visitor(
            |actor: &mut Actor, st: TimeMs, dur: TimeMs| {
                let from = actor.scale_at(st);
                let end = st.saturating_add(dur);
                actor.push_scale(Ease::OutBounce, st, end, from, Vec2::new(0.0, base));
                Ok(())
            },
            |actor: &Actor, t: TimeMs| !actor.color_at(t).approx_eq(hot),
        );
        let wave = Wave {
            start_time: s + 600,
            delay_per_step: 75,
            step_duration: 600,
        };
        propagate_from(&mut ctx.grid, first, first, wave, &mut collapse)?;
    } else {
        tracing::warn!("verse has no in-grid hotspots; collapse wave skipped");
    }
    glitter(&mut ctx.grid, &mut ctx.rng, &glitters, s + 1, 600, 3)?;

    for i in 1..4 {
        marker = (marker + ctx.rng.range_i32(1, 4) as usize) % palette.len();
        grey -= 0.1;
        points += 1;
        let at = s + (d / 4) * i;
        topography(
            &mut ctx.grid,
            at - 600,
            600,
            palette[marker],
            Rgb::grey(grey),
            points,
            &hotspots,
        );
        glitter(&mut ctx.grid, &mut ctx.rng, &glitters, at, 600, 3)?;
    }

    let exit = s + d - 600;
    scale_flip(&mut ctx.grid, exit, 600, Transition::Exit, FlipAxis::X);
    Ok(())
}

/// Hot/cold topography; cold cells flip on the beat and flash red from both top corners.
#[tracing::instrument(skip(ctx))]
pub fn guitar_solo(ctx: &mut Generation<'_>) -> TrigridResult<()> {
    let cfg = ctx.config;
    let (s, d) = (cfg.start_time, cfg.duration);
    let beat = cfg.measure_ms;
    let base = ctx.grid.base_scale();
    let hot = Rgb::new(0.8, 0.1, 0.1);
    let cold = Rgb::grey(0.1);
    let layout = cfg.hotspots.clone().unwrap_or_else(|| SOLO_POINTS.to_vec());
    let preferred = layout.get(SOLO_PIVOT).copied();
    let points = in_grid(&ctx.grid, layout, Behavior::GuitarSolo);

    topography(&mut ctx.grid, s, 0, hot, cold, 3, &points);

    let pivot = preferred
        .filter(|p| points.contains(p))
        .or_else(|| points.last().copied());
    match pivot {
        Some(pivot) => {
            let is_hot = |actor: &Actor, t: TimeMs| actor.color_at(t).approx_eq(hot);
            let full = Vec2::new(base, base);
            let flat = Vec2::new(base, 0.0);

            let mut flip_off = visitor(
                |actor: &mut Actor, st: TimeMs, dur: TimeMs| {
                    actor.loop_group(st, 4, |a| {
                        a.push_scale(Ease::OutCubic, 0, dur, full, flat);
                        a.push_scale(Ease::InCubic, beat - dur, beat, flat, full);
                        a.push_fade(Ease::Linear, beat * 2, beat * 2, 1.0, 1.0);
                        Ok(())
                    })
                },
                is_hot,
            );
            let flip_wave = Wave {
                start_time: s,
                delay_per_step: 150,
                step_duration: 600,
            };
            propagate_from(
                &mut ctx.grid,
                pivot.offset(0, -1),
                pivot,
                flip_wave,
                &mut flip_off,
            )?;

            let mut flash = visitor(
                |actor: &mut Actor, st: TimeMs, step: TimeMs| {
                    let back = actor.color_at(st);
                    actor.loop_group(st, 8, |a| {
                        a.push_color(Ease::OutQuint, 0, step, Rgb::new(1.0, 0.0, 0.0), back);
                        a.push_fade(Ease::Linear, beat, beat, 1.0, 1.0);
                        Ok(())
                    })
                },
                is_hot,
            );
            let flash_wave = Wave {
                start_time: s,
                delay_per_step: 75 / 2,
                step_duration: 300,
            };
            let right = ctx.grid.width() as i32 - 1;
            for corner in [Cell::new(0, 0), Cell::new(right, 0)] {
                propagate_from(&mut ctx.grid, corner, pivot, flash_wave, &mut flash)?;
            }
        }
        None => tracing::warn!("guitar solo has no hotspots; beat waves skipped"),
    }

    let exit = s + d - 600;
    scale_flip(&mut ctx.grid, exit, 600, Transition::Exit, FlipAxis::X);
    Ok(())
}

/// Dark grid with a white shockwave replayed every measure.
#[tracing::instrument(skip(ctx))]
pub fn finale(ctx: &mut Generation<'_>) -> TrigridResult<()> {
    let cfg = ctx.config;
    let (s, d) = (cfg.start_time, cfg.duration);
    let grid = &mut ctx.grid;

    color_all(grid, s, 0, Rgb::grey(0.09));
    shockwave_color(
        grid,
        Wave {
            start_time: s,
            delay_per_step: 75 / 4,
            step_duration: 300,
        },
        cfg.shockwave_point,
        Rgb::WHITE,
        Rgb::new(1.0, 0.0, 0.0),
        Some(Repeat {
            count: 4,
            period: cfg.measure_ms,
        }),
    )?;
    scale_flip(grid, s + d - 500, 500, Transition::Exit, FlipAxis::X);
    Ok(())
}

/// Grid colored from the pixel source, swept by a white shockwave that black pixels block.
#[tracing::instrument(skip(ctx))]
pub fn image_mosaic(ctx: &mut Generation<'_>) -> TrigridResult<()> {
    let cfg = ctx.config;
    let (s, d) = (cfg.start_time, cfg.duration);
    let Some(source) = ctx.pixels else {
        return Err(TrigridError::config(format!(
            "behavior '{}' requires a pixel source",
            Behavior::ImageMosaic
        )));
    };
    let grid = &mut ctx.grid;

    scale_flip(grid, s, 500, Transition::Entry, FlipAxis::Y);
    color_from_pixels(grid, s, 500, source);
    shockwave_color(
        grid,
        Wave {
            start_time: s + 500,
            delay_per_step: cfg.shockwave_delay_time,
            step_duration: cfg.shockwave_step_time,
        },
        cfg.shockwave_point,
        Rgb::WHITE,
        Rgb::BLACK,
        None,
    )?;
    fade(grid, s + d, 500, Transition::Exit);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/behavior/presets.rs"]
mod tests;
