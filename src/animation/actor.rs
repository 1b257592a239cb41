use crate::{
    animation::{
        command::{Channel, Command, Keyed, Lerp, Value},
        ease::Ease,
    },
    foundation::{
        color::Rgb,
        core::{Cell, TimeMs, TimeSpan, Vec2},
        error::{TrigridError, TrigridResult},
    },
};

/// A block of commands with times relative to the block, replayed `count` times from `start`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoopGroup {
    pub start: TimeMs,
    pub count: u32,
    pub commands: Vec<Command>,
}

impl LoopGroup {
    /// Span from the earliest to the latest time used inside the block, across all channels.
    pub fn block_duration(&self) -> TimeMs {
        let lo = self.commands.iter().map(Command::start).min();
        let hi = self.commands.iter().map(Command::end).max();
        match (lo, hi) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    }

    /// Every replay of every command, in absolute time.
    pub fn expanded(&self) -> impl Iterator<Item = Command> + '_ {
        let period = self.block_duration();
        (0..i64::from(self.count)).flat_map(move |k| {
            let base = self.start.saturating_add(k.saturating_mul(period));
            self.commands.iter().map(move |c| c.shifted(base))
        })
    }

    pub fn end(&self) -> TimeMs {
        let last = self.commands.iter().map(Command::end).max().unwrap_or(0);
        let period = self.block_duration();
        let repeats = i64::from(self.count.saturating_sub(1));
        self.start
            .saturating_add(period.saturating_mul(repeats))
            .saturating_add(last)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineItem {
    Command(Command),
    Loop(LoopGroup),
}

/// The animatable object owned by one grid cell.
///
/// Commands are kept in append order. Reading a channel back (`*_at`) is a pure function of the
/// commands appended so far, so later effects can chain from the current state of a cell.
#[derive(Clone, Debug)]
pub struct Actor {
    cell: Cell,
    position: Vec2,
    flip: Option<TimeSpan>,
    timeline: Vec<TimelineItem>,
    open_group: Option<LoopGroup>,
}

impl Actor {
    pub fn new(cell: Cell, position: Vec2) -> Self {
        Self {
            cell,
            position,
            flip: None,
            timeline: Vec::new(),
            open_group: None,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Placement before any position command applies.
    pub fn initial_position(&self) -> Vec2 {
        self.position
    }

    pub fn flip(&self) -> Option<TimeSpan> {
        self.flip
    }

    pub fn set_flip(&mut self, span: TimeSpan) {
        self.flip = Some(span);
    }

    pub fn timeline(&self) -> &[TimelineItem] {
        &self.timeline
    }

    pub fn in_loop_group(&self) -> bool {
        self.open_group.is_some()
    }

    /// Append a command; inside an open loop group its times are block-relative.
    pub fn append(&mut self, command: Command) {
        match &mut self.open_group {
            Some(group) => group.commands.push(command),
            None => self.timeline.push(TimelineItem::Command(command)),
        }
    }

    pub fn append_values(
        &mut self,
        ease: Ease,
        start: TimeMs,
        end: TimeMs,
        from: Value,
        to: Value,
    ) -> TrigridResult<()> {
        let command = Command::from_values(ease, start, end, from, to).ok_or_else(|| {
            TrigridError::animation(format!(
                "channel mismatch: {:?} -> {:?}",
                from.channel(),
                to.channel()
            ))
        })?;
        self.append(command);
        Ok(())
    }

    pub fn push_move(&mut self, ease: Ease, start: TimeMs, end: TimeMs, from: Vec2, to: Vec2) {
        self.append(Command::Position(Keyed::new(ease, start, end, from, to)));
    }

    pub fn push_scale(&mut self, ease: Ease, start: TimeMs, end: TimeMs, from: Vec2, to: Vec2) {
        self.append(Command::Scale(Keyed::new(ease, start, end, from, to)));
    }

    pub fn push_rotate(&mut self, ease: Ease, start: TimeMs, end: TimeMs, from: f64, to: f64) {
        self.append(Command::Rotation(Keyed::new(ease, start, end, from, to)));
    }

    pub fn push_fade(&mut self, ease: Ease, start: TimeMs, end: TimeMs, from: f64, to: f64) {
        self.append(Command::Opacity(Keyed::new(ease, start, end, from, to)));
    }

    pub fn push_color(&mut self, ease: Ease, start: TimeMs, end: TimeMs, from: Rgb, to: Rgb) {
        self.append(Command::Color(Keyed::new(ease, start, end, from, to)));
    }

    pub fn start_loop_group(&mut self, start: TimeMs, count: u32) -> TrigridResult<()> {
        if self.open_group.is_some() {
            return Err(TrigridError::animation(format!(
                "actor {:?} already has an open loop group",
                self.cell
            )));
        }
        if count == 0 {
            return Err(TrigridError::animation("loop group count must be > 0"));
        }
        self.open_group = Some(LoopGroup {
            start,
            count,
            commands: Vec::new(),
        });
        Ok(())
    }

    pub fn end_group(&mut self) -> TrigridResult<()> {
        let group = self.open_group.take().ok_or_else(|| {
            TrigridError::animation(format!("actor {:?} has no open loop group", self.cell))
        })?;
        if !group.commands.is_empty() {
            self.timeline.push(TimelineItem::Loop(group));
        }
        Ok(())
    }

    /// Run `body` inside a loop group, closing it even when `body` fails.
    pub fn loop_group<F>(&mut self, start: TimeMs, count: u32, body: F) -> TrigridResult<()>
    where
        F: FnOnce(&mut Actor) -> TrigridResult<()>,
    {
        self.start_loop_group(start, count)?;
        let res = body(self);
        self.end_group()?;
        res
    }

    pub fn value_at(&self, channel: Channel, t: TimeMs) -> Value {
        match channel {
            Channel::Position => Value::Position(self.position_at(t)),
            Channel::Scale => Value::Scale(self.scale_at(t)),
            Channel::Rotation => Value::Rotation(self.rotation_at(t)),
            Channel::Opacity => Value::Opacity(self.opacity_at(t)),
            Channel::Color => Value::Color(self.color_at(t)),
        }
    }

    pub fn position_at(&self, t: TimeMs) -> Vec2 {
        self.sample(
            t,
            |c| match c {
                Command::Position(k) => Some(*k),
                _ => None,
            },
            self.position,
        )
    }

    pub fn scale_at(&self, t: TimeMs) -> Vec2 {
        self.sample(
            t,
            |c| match c {
                Command::Scale(k) => Some(*k),
                _ => None,
            },
            Vec2::new(1.0, 1.0),
        )
    }

    pub fn rotation_at(&self, t: TimeMs) -> f64 {
        self.sample(
            t,
            |c| match c {
                Command::Rotation(k) => Some(*k),
                _ => None,
            },
            0.0,
        )
    }

    pub fn opacity_at(&self, t: TimeMs) -> f64 {
        self.sample(
            t,
            |c| match c {
                Command::Opacity(k) => Some(*k),
                _ => None,
            },
            1.0,
        )
    }

    pub fn color_at(&self, t: TimeMs) -> Rgb {
        self.sample(
            t,
            |c| match c {
                Command::Color(k) => Some(*k),
                _ => None,
            },
            Rgb::WHITE,
        )
    }

    /// Every committed command in absolute time, loop groups expanded.
    pub fn flattened(&self) -> Vec<Command> {
        let mut out = Vec::new();
        for item in &self.timeline {
            match item {
                TimelineItem::Command(c) => out.push(*c),
                TimelineItem::Loop(g) => out.extend(g.expanded()),
            }
        }
        out
    }

    // Commands in an open group are not visible until the group closes.
    fn sample<T, F>(&self, t: TimeMs, pick: F, default: T) -> T
    where
        T: Lerp + Copy,
        F: Fn(&Command) -> Option<Keyed<T>>,
    {
        let mut segments: Vec<Keyed<T>> = self.flattened().iter().filter_map(&pick).collect();
        if segments.is_empty() {
            return default;
        }
        // Stable: equal starts keep append order, so the later append wins below.
        segments.sort_by_key(|k| k.start);

        let idx = segments.partition_point(|k| k.start <= t);
        if idx == 0 {
            return segments[0].from;
        }
        segments[idx - 1].sample(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/actor.rs"]
mod tests;
