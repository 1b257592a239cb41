use std::{fmt, path::Path, str::FromStr};

use anyhow::Context;

use crate::{
    foundation::{
        color::Hsb,
        core::{Cell, MAX_TIME_MS, TimeMs, Vec2, time_in_range},
        error::{TrigridError, TrigridResult},
    },
    grid::model::GridSpec,
};

/// Named behavior sequence run over a freshly built grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    Fallback,
    TestGradient,
    Verse,
    GuitarSolo,
    Finale,
    ImageMosaic,
}

impl Behavior {
    pub const ALL: [Behavior; 6] = [
        Behavior::Fallback,
        Behavior::TestGradient,
        Behavior::Verse,
        Behavior::GuitarSolo,
        Behavior::Finale,
        Behavior::ImageMosaic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Behavior::Fallback => "fallback",
            Behavior::TestGradient => "test_gradient",
            Behavior::Verse => "verse",
            Behavior::GuitarSolo => "guitar_solo",
            Behavior::Finale => "finale",
            Behavior::ImageMosaic => "image_mosaic",
        }
    }

    /// Whether the behavior samples a pixel source.
    pub fn needs_pixels(self) -> bool {
        matches!(self, Behavior::ImageMosaic)
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Behavior {
    type Err = TrigridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        match Self::ALL.into_iter().find(|b| b.name() == wanted) {
            Some(b) => Ok(b),
            None => {
                let msg = format!("unknown behavior '{wanted}'");
                Err(TrigridError::config(msg))
            }
        }
    }
}

/// Options for one generation pass. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub start_time: TimeMs,
    pub duration: TimeMs,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Screen position of cell (0, 0).
    pub initial_location: Vec2,
    /// Rendered edge length of one triangle.
    pub triangle_size: f64,
    pub image_path: String,
    pub behavior: Behavior,
    /// Degrees.
    pub angle_rotation: f64,
    pub glitter_count: u32,
    /// Glitter pass at the end of the fallback behavior.
    pub fallback_glitter: bool,
    pub shockwave_step_time: TimeMs,
    pub shockwave_delay_time: TimeMs,
    pub shockwave_point: Vec2,
    pub seed: u64,
    /// Pixel size of the triangle sprite.
    pub base_size: f64,
    /// One musical measure; beat-synced loops repeat on it.
    pub measure_ms: TimeMs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspots: Option<Vec<Cell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_color: Option<Hsb>,
    pub layer: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_time: 10_000,
            duration: 5_000,
            grid_width: 4,
            grid_height: 3,
            initial_location: Vec2::new(320.0, 240.0),
            triangle_size: 100.0,
            image_path: "SB/triangle.png".to_owned(),
            behavior: Behavior::Fallback,
            angle_rotation: 45.0,
            glitter_count: 10,
            fallback_glitter: false,
            shockwave_step_time: 100,
            shockwave_delay_time: 50,
            shockwave_point: Vec2::new(320.0, 240.0),
            seed: 0,
            base_size: 100.0,
            measure_ms: 2_400,
            hotspots: None,
            initial_color: None,
            layer: "TriangleBackground".to_owned(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(s: &str) -> TrigridResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        // Behavior names go through `FromStr` so an unknown one is a config error.
        if let Some(name) = value.get("behavior").and_then(serde_json::Value::as_str) {
            name.parse::<Behavior>()?;
        }
        let cfg: Self = serde_json::from_value(value)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> TrigridResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&s)
    }

    pub fn validate(&self) -> TrigridResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(TrigridError::config("grid_width/grid_height must be > 0"));
        }
        if !(self.triangle_size.is_finite() && self.triangle_size > 0.0) {
            return Err(TrigridError::config("triangle_size must be finite and > 0"));
        }
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            return Err(TrigridError::config("base_size must be finite and > 0"));
        }
        if self.duration < 0 {
            return Err(TrigridError::config("duration must be >= 0"));
        }
        if self.shockwave_step_time < 0 || self.shockwave_delay_time < 0 {
            return Err(TrigridError::config("shockwave timings must be >= 0"));
        }
        if self.measure_ms <= 0 {
            return Err(TrigridError::config("measure_ms must be > 0"));
        }
        for (name, t) in [
            ("start_time", self.start_time),
            ("duration", self.duration),
            ("shockwave_step_time", self.shockwave_step_time),
            ("shockwave_delay_time", self.shockwave_delay_time),
            ("measure_ms", self.measure_ms),
        ] {
            if !time_in_range(t) {
                return Err(TrigridError::config(format!(
                    "{name} must lie within +/-{MAX_TIME_MS} ms"
                )));
            }
        }
        if self.glitter_count == 0 {
            return Err(TrigridError::config("glitter_count must be > 0"));
        }
        if !self.angle_rotation.is_finite() {
            return Err(TrigridError::config("angle_rotation must be finite"));
        }
        for (name, v) in [
            ("initial_location", self.initial_location),
            ("shockwave_point", self.shockwave_point),
        ] {
            if !(v.x.is_finite() && v.y.is_finite()) {
                return Err(TrigridError::config(format!("{name} must be finite")));
            }
        }
        if let Some(hsb) = self.initial_color
            && !(hsb.h.is_finite() && hsb.s.is_finite() && hsb.b.is_finite())
        {
            return Err(TrigridError::config("initial_color must be finite"));
        }
        if let Some(hotspots) = &self.hotspots {
            let (w, h) = (self.grid_width as i32, self.grid_height as i32);
            if let Some(c) = hotspots
                .iter()
                .find(|c| c.x < 0 || c.y < 0 || c.x >= w || c.y >= h)
            {
                return Err(TrigridError::config(format!(
                    "hotspot ({}, {}) lies outside the {w}x{h} grid",
                    c.x, c.y
                )));
            }
        }
        Ok(())
    }

    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            width: self.grid_width,
            height: self.grid_height,
            cell_size: self.triangle_size,
            base_size: self.base_size,
            origin: self.initial_location,
            image_path: self.image_path.clone(),
            start_time: self.start_time,
            duration: self.duration,
            initial_color: self.initial_color,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/behavior/config.rs"]
mod tests;
