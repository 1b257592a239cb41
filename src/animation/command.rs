use crate::{
    animation::ease::Ease,
    foundation::{
        color::Rgb,
        core::{TimeMs, Vec2},
    },
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgb::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
        )
    }
}

/// An animatable actor property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Position,
    Scale,
    Rotation,
    Opacity,
    Color,
}

/// A sampled channel value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "channel", content = "value", rename_all = "snake_case")]
pub enum Value {
    Position(Vec2),
    Scale(Vec2),
    Rotation(f64),
    Opacity(f64),
    Color(Rgb),
}

impl Value {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Position(_) => Channel::Position,
            Self::Scale(_) => Channel::Scale,
            Self::Rotation(_) => Channel::Rotation,
            Self::Opacity(_) => Channel::Opacity,
            Self::Color(_) => Channel::Color,
        }
    }
}

/// One eased transition from `from` to `to` over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Keyed<T> {
    pub ease: Ease,
    pub start: TimeMs,
    pub end: TimeMs,
    pub from: T,
    pub to: T,
}

impl<T> Keyed<T>
where
    T: Lerp + Copy,
{
    pub fn new(ease: Ease, start: TimeMs, end: TimeMs, from: T, to: T) -> Self {
        // Reversed spans are normalized so evaluation never sees a negative duration.
        if end < start {
            return Self {
                ease,
                start: end,
                end: start,
                from: to,
                to: from,
            };
        }
        Self {
            ease,
            start,
            end,
            from,
            to,
        }
    }

    /// Value at `t`, holding `from` before the span and `to` from `end` onward.
    pub fn sample(&self, t: TimeMs) -> T {
        if t >= self.end {
            return self.to;
        }
        if t <= self.start {
            return self.from;
        }
        let denom = (self.end - self.start) as f64;
        let te = self.ease.apply((t - self.start) as f64 / denom);
        T::lerp(&self.from, &self.to, te)
    }

    pub fn shifted(&self, by: TimeMs) -> Self {
        Self {
            start: self.start.saturating_add(by),
            end: self.end.saturating_add(by),
            ..*self
        }
    }
}

/// A keyframe command on one channel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Command {
    Position(Keyed<Vec2>),
    Scale(Keyed<Vec2>),
    Rotation(Keyed<f64>),
    Opacity(Keyed<f64>),
    Color(Keyed<Rgb>),
}

macro_rules! with_keyed {
    ($cmd:expr, $k:ident => $body:expr) => {
        match $cmd {
            Command::Position($k) => $body,
            Command::Scale($k) => $body,
            Command::Rotation($k) => $body,
            Command::Opacity($k) => $body,
            Command::Color($k) => $body,
        }
    };
}

impl Command {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Position(_) => Channel::Position,
            Self::Scale(_) => Channel::Scale,
            Self::Rotation(_) => Channel::Rotation,
            Self::Opacity(_) => Channel::Opacity,
            Self::Color(_) => Channel::Color,
        }
    }

    pub fn start(&self) -> TimeMs {
        with_keyed!(self, k => k.start)
    }

    pub fn end(&self) -> TimeMs {
        with_keyed!(self, k => k.end)
    }

    pub fn ease(&self) -> Ease {
        with_keyed!(self, k => k.ease)
    }

    pub fn shifted(&self, by: TimeMs) -> Self {
        match self {
            Self::Position(k) => Self::Position(k.shifted(by)),
            Self::Scale(k) => Self::Scale(k.shifted(by)),
            Self::Rotation(k) => Self::Rotation(k.shifted(by)),
            Self::Opacity(k) => Self::Opacity(k.shifted(by)),
            Self::Color(k) => Self::Color(k.shifted(by)),
        }
    }

    /// Build a command from endpoint values. Mismatched channels yield `None`.
    pub fn from_values(
        ease: Ease,
        start: TimeMs,
        end: TimeMs,
        from: Value,
        to: Value,
    ) -> Option<Self> {
        Some(match (from, to) {
            (Value::Position(a), Value::Position(b)) => {
                Self::Position(Keyed::new(ease, start, end, a, b))
            }
            (Value::Scale(a), Value::Scale(b)) => Self::Scale(Keyed::new(ease, start, end, a, b)),
            (Value::Rotation(a), Value::Rotation(b)) => {
                Self::Rotation(Keyed::new(ease, start, end, a, b))
            }
            (Value::Opacity(a), Value::Opacity(b)) => {
                Self::Opacity(Keyed::new(ease, start, end, a, b))
            }
            (Value::Color(a), Value::Color(b)) => Self::Color(Keyed::new(ease, start, end, a, b)),
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/command.rs"]
mod tests;
