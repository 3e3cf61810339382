//! Bouncing particle simulation.
//!
//! Owns the particle storage and drives the quadtree index each frame:
//! refresh, broad-phase neighbour queries, elastic collisions, integration.

pub mod collision;
pub mod config;
pub mod error;
pub mod particle;
pub mod server;
pub mod world;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use error::SimError;
pub use particle::Particle;
pub use server::run;
pub use world::{FrameStats, Simulation};
