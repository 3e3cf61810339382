//! Simulation configuration.

use quadtree::{RefreshStrategy, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("World size {width}x{height} cannot fit particles of radius {radius}")]
    WorldTooSmall { width: u32, height: u32, radius: f32 },

    #[error("Particle radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("Particle mass must be positive, got {0}")]
    InvalidMass(f32),

    #[error("Maximum speed must be positive, got {0}")]
    InvalidMaxSpeed(f32),

    #[error("Initial speed must be finite and non-negative, got {0}")]
    InvalidInitialSpeed(f32),

    #[error("Attraction must be finite and non-negative, got {0}")]
    InvalidAttraction(f32),

    #[error("Index cell capacity must be at least 1")]
    ZeroCapacity,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Config {
    /// Load configuration from `path`, writing the defaults there if missing.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.particles.radius;
        if !(radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        if !(self.particles.mass > 0.0) {
            return Err(ConfigError::InvalidMass(self.particles.mass));
        }
        let p = &self.particles;
        if !(p.max_speed > 0.0) || !p.max_speed.is_finite() {
            return Err(ConfigError::InvalidMaxSpeed(p.max_speed));
        }
        if !(p.initial_max_speed >= 0.0) || !p.initial_max_speed.is_finite() {
            return Err(ConfigError::InvalidInitialSpeed(p.initial_max_speed));
        }
        if !(p.attraction >= 0.0) || !p.attraction.is_finite() {
            return Err(ConfigError::InvalidAttraction(p.attraction));
        }
        if (self.world.width as f32) <= 2.0 * radius || (self.world.height as f32) <= 2.0 * radius {
            return Err(ConfigError::WorldTooSmall {
                width: self.world.width,
                height: self.world.height,
                radius,
            });
        }
        if self.index.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// World size. The world spans `[0, width) x [0, height)`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_width")]
    pub width: u32,
    #[serde(default = "default_world_height")]
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_width(),
            height: default_world_height(),
        }
    }
}

fn default_world_width() -> u32 {
    1024
}
fn default_world_height() -> u32 {
    768
}

/// Particle population and motion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParticleConfig {
    #[serde(default = "default_particle_count")]
    pub count: usize,
    #[serde(default = "default_particle_radius")]
    pub radius: f32,
    #[serde(default = "default_particle_mass")]
    pub mass: f32,
    /// Spawn velocity components are drawn from `[-initial_max_speed, initial_max_speed)`.
    #[serde(default = "default_initial_max_speed")]
    pub initial_max_speed: f32,
    /// Speed beyond which velocity only grows with the square root of the excess.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Pull strength towards the attractor, divided by particle mass.
    #[serde(default = "default_attraction")]
    pub attraction: f32,
    /// Point every particle accelerates towards, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attractor: Option<[f32; 2]>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: default_particle_count(),
            radius: default_particle_radius(),
            mass: default_particle_mass(),
            initial_max_speed: default_initial_max_speed(),
            max_speed: default_max_speed(),
            attraction: default_attraction(),
            attractor: None,
        }
    }
}

fn default_particle_count() -> usize {
    100
}
fn default_particle_radius() -> f32 {
    5.0
}
fn default_particle_mass() -> f32 {
    20.0
}
fn default_initial_max_speed() -> f32 {
    150.0
}
fn default_max_speed() -> f32 {
    200.0
}
fn default_attraction() -> f32 {
    50.0
}

/// Quadtree settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Points a cell holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// `rebuild` or `incremental`.
    #[serde(default)]
    pub refresh: RefreshStrategy,
    /// With incremental refresh, force a full rebuild every this many frames (0 = never).
    #[serde(default = "default_rebuild_interval")]
    pub rebuild_interval: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_depth: default_max_depth(),
            refresh: RefreshStrategy::default(),
            rebuild_interval: default_rebuild_interval(),
        }
    }
}

fn default_capacity() -> usize {
    4
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_rebuild_interval() -> u64 {
    300
}

/// Frame loop settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Frames to run before exiting (0 = until interrupted).
    #[serde(default)]
    pub frames: u64,
    /// Log frame statistics every this many frames (0 = never).
    #[serde(default = "default_stats_every")]
    pub stats_every: u64,
    /// Seed for particle placement; random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            frames: 0,
            stats_every: default_stats_every(),
            seed: None,
        }
    }
}

fn default_tick_interval() -> u64 {
    16
}
fn default_stats_every() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.world.width, 1024);
        assert_eq!(parsed.particles.count, 100);
        assert_eq!(parsed.index.refresh, RefreshStrategy::Rebuild);
        assert!(parsed.particles.attractor.is_none());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [index]
            refresh = "incremental"
            capacity = 8

            [particles]
            attractor = [512.0, 384.0]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.index.refresh, RefreshStrategy::Incremental);
        assert_eq!(parsed.index.capacity, 8);
        assert_eq!(parsed.index.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(parsed.particles.attractor, Some([512.0, 384.0]));
        assert_eq!(parsed.particles.radius, 5.0);
        assert_eq!(parsed.sim.tick_interval_ms, 16);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.index.capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));

        let mut config = Config::default();
        config.world.width = 8;
        assert!(matches!(config.validate(), Err(ConfigError::WorldTooSmall { .. })));

        let mut config = Config::default();
        config.particles.radius = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRadius(0.0)));

        let mut config = Config::default();
        config.particles.max_speed = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxSpeed(-1.0)));

        let mut config = Config::default();
        config.particles.max_speed = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxSpeed(_))));

        let mut config = Config::default();
        config.particles.initial_max_speed = -5.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidInitialSpeed(-5.0)));

        let mut config = Config::default();
        config.particles.initial_max_speed = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidInitialSpeed(_))));

        let mut config = Config::default();
        config.particles.attraction = -2.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAttraction(-2.0)));

        let mut config = Config::default();
        config.particles.attraction = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAttraction(_))));
    }
}
