pub use kurbo::{Affine, Point, Vec2};

/// Timeline position in integer milliseconds.
pub type TimeMs = i64;

/// Largest magnitude accepted for configured times and durations (about 35 years).
///
/// Sums of a few bounded times plus fixed effect offsets stay far inside `i64`.
pub const MAX_TIME_MS: TimeMs = 1 << 40;

/// Whether `t` lies in `[-MAX_TIME_MS, MAX_TIME_MS]`.
pub fn time_in_range(t: TimeMs) -> bool {
    (-MAX_TIME_MS..=MAX_TIME_MS).contains(&t)
}

/// A discrete grid index.
///
/// Kept distinct from [`Vec2`] so screen coordinates and cell indices cannot be mixed up.
/// Components are signed: callers routinely step off the grid edge (e.g. `seed - (0, 1)`),
/// and every grid operation treats out-of-range cells as a no-op.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Tile distance (|dx| + |dy|).
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbors in traversal order: north, west, south, east.
    pub fn neighbors(self) -> [Cell; 4] {
        [
            self.offset(0, -1),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(1, 0),
        ]
    }
}

/// Closed time interval used for parameter spans such as vertical flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    pub start: TimeMs,
    pub end: TimeMs,
}

impl TimeSpan {
    pub fn new(start: TimeMs, end: TimeMs) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn contains(self, t: TimeMs) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Manhattan distance between two continuous points.
pub fn manhattan_distance(a: Vec2, b: Vec2) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean distance between two continuous points.
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (a - b).hypot()
}

/// Rotate `v` about the screen origin by `radians`.
pub fn polar_rotation(v: Vec2, radians: f64) -> Vec2 {
    (Affine::rotate(radians) * v.to_point()).to_vec2()
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
