use crate::{
    animation::actor::{Actor, TimelineItem},
    behavior::{config::GeneratorConfig, presets},
    foundation::{
        core::{Cell, TimeSpan, Vec2},
        error::{TrigridError, TrigridResult},
        rng::GenRng,
    },
    grid::{model::Grid, pixels::PixelSource},
};

/// State shared by the steps of one generation pass.
pub struct Generation<'a> {
    pub config: &'a GeneratorConfig,
    pub grid: Grid,
    pub rng: GenRng,
    pub pixels: Option<&'a dyn PixelSource>,
}

impl<'a> Generation<'a> {
    /// Validate `config`, build its grid, and seed the random source.
    pub fn new(
        config: &'a GeneratorConfig,
        pixels: Option<&'a dyn PixelSource>,
    ) -> TrigridResult<Self> {
        config.validate()?;
        if config.behavior.needs_pixels() && pixels.is_none() {
            return Err(TrigridError::config(format!(
                "behavior '{}' requires a pixel source",
                config.behavior
            )));
        }
        Ok(Self {
            config,
            grid: Grid::build(&config.grid_spec())?,
            rng: GenRng::new(config.seed),
            pixels,
        })
    }

    /// Run the configured behavior and hand the finished grid off as a storyboard.
    pub fn run(mut self) -> TrigridResult<Storyboard> {
        presets::run(self.config.behavior, &mut self)?;
        Ok(Storyboard::from_grid(&self.config.layer, self.grid))
    }
}

/// One generation pass: `config` in, scripted actors out.
#[tracing::instrument(
    skip(config, pixels),
    fields(behavior = %config.behavior, seed = config.seed)
)]
pub fn generate(
    config: &GeneratorConfig,
    pixels: Option<&dyn PixelSource>,
) -> TrigridResult<Storyboard> {
    let storyboard = Generation::new(config, pixels)?.run()?;
    tracing::info!(
        actors = storyboard.actors.len(),
        commands = storyboard.command_count(),
        "storyboard generated"
    );
    Ok(storyboard)
}

/// Everything an exporter needs to write the sprites out.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Storyboard {
    pub layer: String,
    pub image_path: String,
    /// Column-major, matching the grid scan order.
    pub actors: Vec<ActorScript>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActorScript {
    pub cell: Cell,
    pub position: Vec2,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip: Option<TimeSpan>,
    pub timeline: Vec<TimelineItem>,
}

impl From<Actor> for ActorScript {
    fn from(actor: Actor) -> Self {
        Self {
            cell: actor.cell(),
            position: actor.initial_position(),
            flip: actor.flip(),
            timeline: actor.timeline().to_vec(),
        }
    }
}

impl Storyboard {
    pub fn from_grid(layer: &str, grid: Grid) -> Self {
        let image_path = grid.image_path().to_owned();
        Self {
            layer: layer.to_owned(),
            image_path,
            actors: grid.into_actors().into_iter().map(ActorScript::from).collect(),
        }
    }

    /// Top-level timeline entries across all actors; a loop group counts once.
    pub fn command_count(&self) -> usize {
        self.actors.iter().map(|a| a.timeline.len()).sum()
    }

    pub fn to_json_pretty(&self) -> TrigridResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/behavior/session.rs"]
mod tests;
