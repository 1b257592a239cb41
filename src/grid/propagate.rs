//! Flood-fill propagation over the 4-neighbour cell graph.
//!
//! A wave starts at a seed cell and schedules a caller-supplied effect on every reachable cell,
//! delayed in proportion to the cell's tile distance from the wave origin. Wall cells stop the
//! wave: they are not visited and nothing is reached through them.

use crate::{
    animation::actor::Actor,
    foundation::{
        core::{Cell, TimeMs, Vec2, distance},
        error::TrigridResult,
    },
    grid::model::Grid,
};

/// Per-cell effect and stop test injected into a propagation.
pub trait Visitor {
    /// Apply the effect to `actor`, starting at `start` and lasting `duration`.
    fn visit(&mut self, actor: &mut Actor, start: TimeMs, duration: TimeMs) -> TrigridResult<()>;

    /// Whether `actor` blocks the wave. Evaluated at the wave's start time.
    fn is_wall(&self, _actor: &Actor, _time: TimeMs) -> bool {
        false
    }
}

/// A [`Visitor`] assembled from two closures.
pub struct FnVisitor<V, W> {
    visit: V,
    wall: W,
}

pub fn visitor<V, W>(visit: V, wall: W) -> FnVisitor<V, W>
where
    V: FnMut(&mut Actor, TimeMs, TimeMs) -> TrigridResult<()>,
    W: Fn(&Actor, TimeMs) -> bool,
{
    FnVisitor { visit, wall }
}

/// Wall predicate that never blocks.
pub fn no_wall(_actor: &Actor, _time: TimeMs) -> bool {
    false
}

impl<V, W> Visitor for FnVisitor<V, W>
where
    V: FnMut(&mut Actor, TimeMs, TimeMs) -> TrigridResult<()>,
    W: Fn(&Actor, TimeMs) -> bool,
{
    fn visit(&mut self, actor: &mut Actor, start: TimeMs, duration: TimeMs) -> TrigridResult<()> {
        (self.visit)(actor, start, duration)
    }

    fn is_wall(&self, actor: &Actor, time: TimeMs) -> bool {
        (self.wall)(actor, time)
    }
}

/// Wave timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wave {
    pub start_time: TimeMs,
    /// Extra delay per tile of distance from the origin.
    pub delay_per_step: TimeMs,
    /// Duration handed to each visit.
    pub step_duration: TimeMs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub cell: Cell,
    pub start: TimeMs,
    pub distance: u32,
}

/// Visits performed by one propagation, in visit order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    pub visits: Vec<Visit>,
}

impl PropagationReport {
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.visits.iter().any(|v| v.cell == cell)
    }
}

/// One `width x height` visited matrix per propagation call.
#[derive(Clone, Debug)]
pub struct VisitedSet {
    width: u32,
    height: u32,
    marks: Vec<bool>,
}

impl VisitedSet {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            marks: vec![false; width as usize * height as usize],
        }
    }

    fn slot(&self, cell: Cell) -> Option<usize> {
        let in_range = cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height;
        in_range.then(|| cell.x as usize * self.height as usize + cell.y as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.slot(cell).is_some_and(|i| self.marks[i])
    }

    /// Mark `cell`; false when already marked or out of range.
    pub fn insert(&mut self, cell: Cell) -> bool {
        match self.slot(cell) {
            Some(i) if !self.marks[i] => {
                self.marks[i] = true;
                true
            }
            _ => false,
        }
    }
}

/// Propagate a wave whose delays are measured from the seed itself.
pub fn propagate<V>(
    grid: &mut Grid,
    seed: Cell,
    wave: Wave,
    visitor: &mut V,
) -> TrigridResult<PropagationReport>
where
    V: Visitor + ?Sized,
{
    propagate_from(grid, seed, seed, wave, visitor)
}

/// Propagate a wave from `seed`, measuring delays from `origin`.
///
/// Iterative depth-first traversal; the visit order matches a recursive fill that tries north,
/// west, south, then east. Out-of-range seeds produce an empty report.
pub fn propagate_from<V>(
    grid: &mut Grid,
    seed: Cell,
    origin: Cell,
    wave: Wave,
    visitor: &mut V,
) -> TrigridResult<PropagationReport>
where
    V: Visitor + ?Sized,
{
    let mut visited = VisitedSet::new(grid.width(), grid.height());
    let mut report = PropagationReport::default();
    let mut stack = vec![seed];

    while let Some(cell) = stack.pop() {
        if visited.contains(cell) {
            continue;
        }
        let Some(actor) = grid.actor_mut(cell) else {
            continue;
        };
        if visitor.is_wall(actor, wave.start_time) {
            continue;
        }
        visited.insert(cell);

        let steps = cell.manhattan(origin);
        let start = wave
            .start_time
            .saturating_add(wave.delay_per_step.saturating_mul(i64::from(steps)));
        visitor.visit(actor, start, wave.step_duration)?;
        report.visits.push(Visit {
            cell,
            start,
            distance: steps,
        });

        // Reversed so north is popped first.
        stack.extend(cell.neighbors().into_iter().rev());
    }

    tracing::debug!(
        seed = ?seed,
        origin = ?origin,
        visited = report.len(),
        "wave propagated"
    );
    Ok(report)
}

/// The cell whose position at `time` is nearest to `target`; ties keep the first in scan order.
pub fn nearest_cell(grid: &Grid, target: Vec2, time: TimeMs) -> Option<Cell> {
    let mut best: Option<(Cell, f64)> = None;
    for actor in grid.actors() {
        let d = distance(actor.position_at(time), target);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((actor.cell(), d));
        }
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/propagate.rs"]
mod tests;
