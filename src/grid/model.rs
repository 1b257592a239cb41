use crate::{
    animation::{actor::Actor, ease::Ease},
    foundation::{
        color::{Hsb, Rgb},
        core::{Cell, MAX_TIME_MS, TimeMs, TimeSpan, Vec2, time_in_range},
        error::{TrigridError, TrigridResult},
    },
};

/// Placement and initial state of a triangle grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    pub width: u32,
    pub height: u32,
    /// On-screen triangle size in pixels.
    pub cell_size: f64,
    /// Pixel size of the sprite asset; `cell_size / base_size` is the initial scale.
    pub base_size: f64,
    pub origin: Vec2,
    pub image_path: String,
    pub start_time: TimeMs,
    pub duration: TimeMs,
    pub initial_color: Option<Hsb>,
}

impl GridSpec {
    pub fn validate(&self) -> TrigridResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TrigridError::config(format!(
                "grid dimensions must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(TrigridError::config("cell size must be finite and > 0"));
        }
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            return Err(TrigridError::config("base size must be finite and > 0"));
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(TrigridError::config("grid origin must be finite"));
        }
        if self.duration < 0 {
            return Err(TrigridError::config("duration must be >= 0"));
        }
        if !(time_in_range(self.start_time) && time_in_range(self.duration)) {
            return Err(TrigridError::config(format!(
                "start_time and duration must lie within +/-{MAX_TIME_MS} ms"
            )));
        }
        Ok(())
    }

    /// Screen placement of a cell: a half step on x staggers neighbouring triangles.
    pub fn placement(&self, x: u32, y: u32) -> Vec2 {
        self.origin
            + Vec2::new(
                f64::from(x) * self.cell_size * 0.5,
                f64::from(y) * self.cell_size,
            )
    }
}

/// Dense `width x height` arena of actors, indexed by cell.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    base_scale: f64,
    image_path: String,
    actors: Vec<Actor>,
}

impl Grid {
    /// Build the grid in column-major scan order, alternating the flip flag on every visit.
    #[tracing::instrument(skip(spec), fields(width = spec.width, height = spec.height))]
    pub fn build(spec: &GridSpec) -> TrigridResult<Self> {
        spec.validate()?;

        let base_scale = spec.cell_size / spec.base_size;
        let scale = Vec2::new(base_scale, base_scale);
        let seed_color = spec.initial_color.map(Rgb::from);
        let flip_span = TimeSpan::new(spec.start_time, spec.start_time + spec.duration);

        let mut actors = Vec::with_capacity(spec.width as usize * spec.height as usize);
        let mut upside_down = false;
        for x in 0..spec.width {
            for y in 0..spec.height {
                let cell = Cell::new(x as i32, y as i32);
                let mut actor = Actor::new(cell, spec.placement(x, y));
                if upside_down {
                    actor.set_flip(flip_span);
                }
                actor.push_scale(Ease::Linear, spec.start_time, spec.start_time, scale, scale);
                if let Some(c) = seed_color {
                    actor.push_color(Ease::Linear, spec.start_time, spec.start_time, c, c);
                }
                actors.push(actor);
                upside_down = !upside_down;
            }
        }

        tracing::debug!(actors = actors.len(), base_scale, "grid built");
        Ok(Self {
            width: spec.width,
            height: spec.height,
            base_scale,
            image_path: spec.image_path.clone(),
            actors,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Initial uniform scale (`cell_size / base_size`).
    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.x as usize * self.height as usize + cell.y as usize)
    }

    pub fn actor(&self, cell: Cell) -> Option<&Actor> {
        self.index(cell).map(|i| &self.actors[i])
    }

    pub fn actor_mut(&mut self, cell: Cell) -> Option<&mut Actor> {
        self.index(cell).map(move |i| &mut self.actors[i])
    }

    /// Actors in scan order (column-major).
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn actors_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn into_actors(self) -> Vec<Actor> {
        self.actors
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
