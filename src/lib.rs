//! Trigrid generates keyframed storyboard commands for a tessellated triangle background.
//!
//! A generation pass turns a [`GeneratorConfig`] into a [`Storyboard`]:
//!
//! 1. **Build**: lay out a staggered grid of triangle actors (`grid::model`).
//! 2. **Compose**: run one named [`Behavior`], a fixed sequence of fills, flood-fill waves,
//!    and grid transforms that append timed commands to each actor.
//! 3. **Export**: hand every actor's timeline (commands and loop groups) to the caller as
//!    serializable [`ActorScript`]s.
//!
//! Effects chain by reading an actor's current value on a channel at a given time, so later
//! steps always start from wherever earlier steps left a cell.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: all randomness flows from one seeded [`GenRng`] per pass.
//! - **No IO in the core**: config files and images are loaded by the binary.
#![forbid(unsafe_code)]

pub mod animation;
pub mod behavior;
pub mod foundation;
pub mod grid;

pub use animation::{
    actor::{Actor, LoopGroup, TimelineItem},
    command::{Channel, Command, Keyed, Lerp, Value},
    ease::Ease,
};
pub use behavior::{
    config::{Behavior, GeneratorConfig},
    session::{ActorScript, Generation, Storyboard, generate},
};
pub use foundation::{
    color::{Hsb, Rgb},
    core::{Cell, TimeMs, TimeSpan, Vec2},
    error::{TrigridError, TrigridResult},
    rng::GenRng,
};
pub use grid::{
    model::{Grid, GridSpec},
    pixels::PixelSource,
    propagate::{PropagationReport, Visitor, Wave, propagate, propagate_from},
};
